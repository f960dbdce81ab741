//! Invocation context, derived once at startup

use crate::config::EnvMap;
use std::io::IsTerminal;
use std::path::Path;

/// Environment variable carrying the parent repl's pid once wrapped
pub const SENTINEL_KEY: &str = "__RLWRAP_REPL__";

/// Suffix recognised on aliased executables (`git-repl`, `brew-repl`, ...)
pub const ALIAS_SUFFIX: &str = "-repl";

/// How this process was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Full argument vector, program name included
    pub args: Vec<String>,
    /// Base name the executable was invoked as
    pub name: String,
    /// Pid of the repl that relaunched us under the line-editing wrapper
    pub wrapper_pid: Option<String>,
    /// Is standard input a terminal?
    pub interactive: bool,
}

impl Invocation {
    /// Inspect the running process
    pub fn detect(args: Vec<String>, env: &EnvMap) -> Self {
        Self::new(args, env, std::io::stdin().is_terminal())
    }

    pub fn new(args: Vec<String>, env: &EnvMap, interactive: bool) -> Self {
        let name = args
            .first()
            .and_then(|arg0| Path::new(arg0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Invocation {
            args,
            name,
            wrapper_pid: env.get(SENTINEL_KEY).cloned(),
            interactive,
        }
    }

    /// Already running inside the line-editing wrapper?
    pub fn wrapped(&self) -> bool {
        self.wrapper_pid.is_some()
    }

    /// Arguments after the program name
    pub fn rest(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Is `flag` present anywhere in the arguments?
    pub fn has_flag(&self, flag: &str) -> bool {
        self.rest().iter().any(|arg| arg == flag)
    }

    /// The command embedded in an aliased name: `git-repl` gives `git`
    pub fn alias_command(&self) -> Option<&str> {
        self.name
            .strip_suffix(ALIAS_SUFFIX)
            .filter(|command| !command.is_empty())
    }
}
