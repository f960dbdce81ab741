//! Self-relaunch controller
//!
//! Runs before anything else and may replace the current process with:
//! - the canonical `repl` when invoked under an alias like `git-repl`
//! - a documentation viewer for `--man` / `--html`
//! - the `rlwrap` line-editing wrapper, with command-specific history
//!   and completion files
//!
//! Decisions are computed as plain [`Action`] values and performed by
//! [`gate`]; a successful replacement never returns.

use crate::cli;
use crate::config::{Config, EnvMap};
use crate::context::{Invocation, SENTINEL_KEY};
use crate::flags::is_loop_flag;
use crate::process::replace_process;
use crate::resolver::ExecutableResolver;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// The line-editing wrapper program
pub const WRAPPER: &str = "rlwrap";

#[cfg(target_os = "macos")]
const HTML_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const HTML_OPENER: &str = "xdg-open";

#[derive(Error, Debug)]
pub enum RelaunchError {
    #[error("cannot resolve repl executable: {0}")]
    CurrentExe(#[source] io::Error),
    #[error("exec: \"{0}\": executable file not found in $PATH")]
    NotFound(String),
    #[error("argument contains a NUL byte: {0:?}")]
    NulByte(String),
    #[cfg(unix)]
    #[error("exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: nix::Error,
    },
    #[cfg(not(unix))]
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// What the controller decided to do instead of running the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print text and exit successfully
    Show(String),
    /// Replace this process
    Replace(Replacement),
}

/// A program to start in place of the current process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Name looked up on the search path
    pub program: String,
    /// Full argument vector, `argv[0]` included
    pub argv: Vec<String>,
    /// Variables exported just before the replacement
    pub exports: Vec<(String, String)>,
}

impl Replacement {
    fn new(program: &str, args: impl IntoIterator<Item = String>) -> Self {
        let mut argv = vec![program.to_string()];
        argv.extend(args);
        Replacement {
            program: program.to_string(),
            argv,
            exports: Vec::new(),
        }
    }
}

/// Outcome of the gate when this process keeps running
#[derive(Debug)]
pub enum Gate {
    /// Version or help was printed; exit successfully
    Exit,
    /// Run the loop with this configuration
    Run(Config),
}

/// Facts about the host the controller needs
pub trait Host {
    /// Find an executable on the search path
    fn which(&self, name: &str) -> Option<PathBuf>;
    /// Absolute path to the running executable
    fn current_exe(&self) -> Result<PathBuf, RelaunchError>;
    /// `rlwrap --version` output, if the wrapper is installed
    fn wrapper_version(&self) -> Option<String>;
    fn pid(&self) -> u32;
}

/// The real host: search path from the environment snapshot
pub struct System {
    resolver: ExecutableResolver,
}

impl System {
    pub fn new(env: &EnvMap) -> Self {
        let path = env.get("PATH").map(String::as_str).unwrap_or_default();
        System {
            resolver: ExecutableResolver::new(path),
        }
    }
}

impl Host for System {
    fn which(&self, name: &str) -> Option<PathBuf> {
        self.resolver.which(name)
    }

    fn current_exe(&self) -> Result<PathBuf, RelaunchError> {
        std::env::current_exe().map_err(RelaunchError::CurrentExe)
    }

    fn wrapper_version(&self) -> Option<String> {
        let program = self.which(WRAPPER)?;
        let output = Command::new(program).arg("--version").output().ok()?;
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            None
        } else {
            Some(version)
        }
    }

    fn pid(&self) -> u32 {
        std::process::id()
    }
}

/// Checks that run before configuration: alias, version, help, docs
pub fn startup_action(ctx: &Invocation, host: &dyn Host) -> Result<Option<Action>, RelaunchError> {
    // 'git-repl [args]' becomes 'repl git [args]'
    if let Some(command) = ctx.alias_command() {
        let args = std::iter::once(command.to_string()).chain(ctx.rest().iter().cloned());
        return Ok(Some(Action::Replace(Replacement::new(cli::NAME, args))));
    }

    if ctx.has_flag("--version") {
        let version = cli::version_string(host.wrapper_version().as_deref());
        return Ok(Some(Action::Show(version)));
    }

    if ctx.has_flag("--help") {
        return Ok(Some(Action::Show(cli::HELP.to_string())));
    }

    if ctx.has_flag("--man") {
        let page = install_dir(host)?.join("repl.1");
        return Ok(Some(Action::Replace(Replacement::new("man", [display(&page)]))));
    }

    if ctx.has_flag("--html") {
        let page = install_dir(host)?.join("repl.1.html");
        return Ok(Some(Action::Replace(Replacement::new(HTML_OPENER, [display(&page)]))));
    }

    Ok(None)
}

/// Relaunch under the line-editing wrapper when interactive and not yet wrapped
pub fn wrapper_action(
    ctx: &Invocation,
    config: &Config,
    host: &dyn Host,
) -> Result<Option<Action>, RelaunchError> {
    if !ctx.interactive || ctx.wrapped() || host.which(WRAPPER).is_none() {
        return Ok(None);
    }

    let mut args = wrapper_options(ctx, config, host);
    args.push(display(&host.current_exe()?));
    args.extend(ctx.rest().iter().cloned());

    let mut replacement = Replacement::new(WRAPPER, args);
    replacement.exports = config.file_vars.clone();
    replacement
        .exports
        .push((SENTINEL_KEY.to_string(), host.pid().to_string()));

    Ok(Some(Action::Replace(replacement)))
}

/// The command being wrapped: first argument that is not a loop flag
pub fn target_command(ctx: &Invocation) -> Option<String> {
    let first = ctx.rest().iter().map(|arg| arg.trim()).find(|arg| !is_loop_flag(arg))?;
    let name = Path::new(first).file_name()?.to_string_lossy().into_owned();
    Some(name)
}

/// `rlwrap` options for the target command
fn wrapper_options(ctx: &Invocation, config: &Config, host: &dyn Host) -> Vec<String> {
    // no default break characters, so '-' stays part of a word
    let mut options = vec!["-b".to_string(), "''".to_string()];

    let command = ctx
        .rest()
        .iter()
        .map(|arg| arg.trim())
        .find(|arg| !is_loop_flag(arg))
        .filter(|first| host.which(first).is_some())
        .and_then(|_| target_command(ctx));

    if let Some(command) = command {
        if let Some(history) = config.history_file_for(&command) {
            options.push("-H".to_string());
            options.push(display(&history));
        }
        if let Some(completion) = config.completion_file_for(&command) {
            options.push("-f".to_string());
            options.push(display(&completion));
        }
    }

    options
}

/// Run the controller; returns only when this process should keep going
pub fn gate(ctx: &Invocation, env: &EnvMap, host: &dyn Host) -> Result<Gate, RelaunchError> {
    if let Some(action) = startup_action(ctx, host)? {
        return perform(action, host);
    }

    let config = Config::load(env, ctx.wrapped());

    if let Some(action) = wrapper_action(ctx, &config, host)? {
        return perform(action, host);
    }

    Ok(Gate::Run(config))
}

fn perform(action: Action, host: &dyn Host) -> Result<Gate, RelaunchError> {
    match action {
        Action::Show(text) => {
            println!("{}", text);
            Ok(Gate::Exit)
        }
        Action::Replace(replacement) => {
            let program = host
                .which(&replacement.program)
                .ok_or_else(|| RelaunchError::NotFound(replacement.program.clone()))?;

            for (key, value) in &replacement.exports {
                std::env::set_var(key, value);
            }

            match replace_process(&program, &replacement.argv)? {}
        }
    }
}

fn install_dir(host: &dyn Host) -> Result<PathBuf, RelaunchError> {
    let exe = host.current_exe()?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
