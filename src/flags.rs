//! Position-independent flag extraction
//!
//! Flags are removed from anywhere in the argument list so they can be
//! interspersed with the command being templated.

use crate::config::Config;

/// Flags that control the loop (as opposed to `--version` and friends)
pub const LOOP_FLAGS: &[&str] = &["--stdin", "--printf", "--escape", "--debug", "--quiet"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub stdin: bool,
    pub printf: bool,
    pub escape: bool,
    pub debug: bool,
    pub quiet: bool,
}

impl Flags {
    /// Remove every loop flag from `args`, recording which were present
    ///
    /// `--debug` and `--quiet` default to the configured values.
    pub fn extract(args: &mut Vec<String>, config: &Config) -> Self {
        let mut flags = Flags {
            debug: config.debug,
            quiet: config.quiet,
            ..Flags::default()
        };

        args.retain(|arg| {
            match arg.as_str() {
                "--stdin" => flags.stdin = true,
                "--printf" => flags.printf = true,
                "--escape" => flags.escape = true,
                "--debug" => flags.debug = true,
                "--quiet" => flags.quiet = true,
                _ => return true,
            }
            false
        });

        flags
    }
}

/// Is `arg` one of the loop flags?
pub fn is_loop_flag(arg: &str) -> bool {
    LOOP_FLAGS.contains(&arg)
}
