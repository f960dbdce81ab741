//! Process-image replacement

use crate::relaunch::RelaunchError;
use std::convert::Infallible;
use std::path::Path;

/// Replace the current process with `program`, never returning on success
///
/// `argv[0]` is the name the new program sees itself invoked as. The
/// current environment is passed along unchanged.
#[cfg(unix)]
pub fn replace_process(program: &Path, argv: &[String]) -> Result<Infallible, RelaunchError> {
    use nix::unistd::execv;
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path = CString::new(program.as_os_str().as_bytes())
        .map_err(|_| RelaunchError::NulByte(program.display().to_string()))?;

    let argv = argv
        .iter()
        .map(|arg| CString::new(arg.as_bytes()).map_err(|_| RelaunchError::NulByte(arg.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    execv(&path, &argv).map_err(|source| RelaunchError::Exec {
        program: program.display().to_string(),
        source,
    })
}

/// Without an exec primitive: run the program to completion and mirror its status
#[cfg(not(unix))]
pub fn replace_process(program: &Path, argv: &[String]) -> Result<Infallible, RelaunchError> {
    use std::process::{Command, Stdio};

    let status = Command::new(program)
        .args(argv.iter().skip(1))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| RelaunchError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    std::process::exit(status.code().unwrap_or(1))
}
