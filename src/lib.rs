//! repl - sort of a REPL for any command
//!
//! # Overview
//!
//! repl reads lines from standard input, substitutes each one into a fixed
//! command template and runs the result with `sh -c`. Any non-interactive
//! command becomes a line-at-a-time loop:
//!
//! ```text
//! $ repl curl -s http://localhost:8080/%s
//! "curl -s http://localhost:8080/%s" >> health
//! {"status":"ok"}
//! ```
//!
//! # Startup
//!
//! Before the loop starts, [`relaunch::gate`] may replace the process:
//! aliased names like `git-repl` relaunch as `repl git`, `--man`/`--html`
//! open the documentation, and interactive sessions relaunch under
//! `rlwrap` with a command-specific history (`~/.git_history`) and
//! completion file (`~/.repl/git`).
//!
//! # Example
//!
//! ```rust
//! use repl::{Flags, Template};
//!
//! let words = vec!["git".to_string(), "show".to_string()];
//! let template = Template::build(&words, &Flags::default()).unwrap();
//! assert_eq!(template.expand("HEAD"), "git show HEAD");
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod display;
pub mod executor;
pub mod flags;
pub mod input;
pub mod process;
pub mod quote;
pub mod relaunch;
pub mod repl;
pub mod resolver;
pub mod signals;
pub mod template;

// Re-export commonly used items
pub use config::{ConfFile, Config, EnvMap};
pub use context::Invocation;
pub use executor::{ExecuteError, Runner, ShellRunner};
pub use flags::Flags;
pub use input::{EditorSource, Input, LineSource, StdinSource};
pub use quote::shell_escape;
pub use relaunch::{Gate, RelaunchError};
pub use repl::{Execution, Repl, ReplOptions, Summary};
pub use resolver::ExecutableResolver;
pub use template::{Template, TemplateError, MARKER};
