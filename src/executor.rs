//! Executor: runs expanded commands through `sh -c`

use crate::signals;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("failed to start sh: {0}")]
    Spawn(#[from] io::Error),
    #[error("exit status {0}")]
    ExitStatus(i32),
    #[error("signal: {0}")]
    Signal(i32),
    #[error("Command was interrupted")]
    Interrupted,
}

/// Launches one expanded command and waits for it
pub trait Runner {
    fn run(&mut self, command: &str) -> Result<(), ExecuteError>;
}

/// Runs commands with `sh -c`, inheriting stdin, stdout and stderr
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    /// Extra variables for every command (config file entries)
    envs: Vec<(String, String)>,
}

impl ShellRunner {
    pub fn new(envs: Vec<(String, String)>) -> Self {
        ShellRunner { envs }
    }
}

impl Runner for ShellRunner {
    fn run(&mut self, command: &str) -> Result<(), ExecuteError> {
        signals::command_starting();
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                signals::command_finished();
                return Err(ExecuteError::Spawn(e));
            }
        };

        signals::set_foreground_pid(child.id());
        let status = child.wait();
        signals::command_finished();
        let status = status?;

        if signals::take_interrupted() && !status.success() {
            return Err(ExecuteError::Interrupted);
        }

        check_status(status)
    }
}

fn check_status(status: ExitStatus) -> Result<(), ExecuteError> {
    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        return Err(ExecuteError::ExitStatus(code));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(ExecuteError::Signal(signal));
        }
    }

    Err(ExecuteError::ExitStatus(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_command() {
        assert!(ShellRunner::default().run("true").is_ok());
    }

    #[test]
    fn failing_command_reports_status() {
        let err = ShellRunner::default().run("exit 3").unwrap_err();
        assert!(matches!(err, ExecuteError::ExitStatus(3)));
        assert_eq!(err.to_string(), "exit status 3");
    }

    #[test]
    fn missing_command_fails_with_127() {
        let err = ShellRunner::default().run("nonexistent_cmd_xyz_123").unwrap_err();
        assert!(matches!(err, ExecuteError::ExitStatus(127)));
    }

    #[test]
    fn extra_environment_visible() {
        let mut runner = ShellRunner::new(vec![("REPL_TEST_VALUE".to_string(), "42".to_string())]);
        assert!(runner.run("test \"$REPL_TEST_VALUE\" = 42").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn killed_command_reports_signal() {
        let err = ShellRunner::default().run("kill -9 $$").unwrap_err();
        assert!(matches!(err, ExecuteError::Signal(9)));
    }
}
