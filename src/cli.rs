//! Help and version text

pub const NAME: &str = "repl";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Toolchain the crate declares as its minimum
const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

/// Shown in the version string when the wrapper binary is absent
pub const WRAPPER_NOT_FOUND: &str = "rlwrap not found";

pub const HELP: &str = r#"Usage: repl [options] command ...

Options:
  --version Display repl version information
  --help    Display repl usage information
  --man     Display the repl man page
  --html    Open HTML version of man page
  --stdin   Pipe input to command's STDIN
  --printf  Avoid newline chars in STDIN
  --escape  Shell escape user's input
  --debug   Display each command being executed
  --quiet   Don't echo the prompt in pipelines

Environment:
  REPL_PROMPT          Prompt suffix (default: >>)
  REPL_HISTORY_DIR     Directory for .<command>_history files (default: $HOME)
  REPL_COMPLETION_DIR  Directory for <command> completion files (default: $HOME/.repl)
  REPL_CONF            Config file of key=value lines (default: $HOME/.repl.conf)
  REPL_DEBUG           Same as --debug when true
  REPL_QUIET           Same as --quiet when true
  REPL_ECHO            Echo piped input lines (default: true)

Homepage:

  http://github.com/pvdb/repl

Bug reports, suggestions, updates:

  http://github.com/pvdb/repl/issues

That's all Folks!"#;

/// `repl 1.0.0 (rlwrap 0.46.1, rust 1.70)`
pub fn version_string(wrapper_version: Option<&str>) -> String {
    format!(
        "{} {} ({}, rust {})",
        NAME,
        VERSION,
        wrapper_version.unwrap_or(WRAPPER_NOT_FOUND),
        RUST_VERSION
    )
}
