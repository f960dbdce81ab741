//! The execution loop
//!
//! Reads a line, templates it into a shell command, runs it, reports the
//! outcome, and repeats until the line source is exhausted. A failing
//! command never stops the loop.

use crate::config::Config;
use crate::context::Invocation;
use crate::display::{compose_prompt, log_line, Color};
use crate::executor::{ExecuteError, Runner};
use crate::flags::Flags;
use crate::input::LineSource;
use crate::quote::shell_escape;
use crate::template::Template;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Settings that shape the loop's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOptions {
    /// Input comes from a terminal
    pub interactive: bool,
    /// Running inside the line-editing wrapper
    pub wrapped: bool,
    pub quiet: bool,
    pub debug: bool,
    /// Shell-escape each line before substitution
    pub escape: bool,
    /// Echo piped lines back to the output
    pub echo: bool,
    /// Prompt suffix
    pub prompt: String,
}

impl ReplOptions {
    pub fn new(ctx: &Invocation, config: &Config, flags: &Flags) -> Self {
        ReplOptions {
            interactive: ctx.interactive,
            wrapped: ctx.wrapped(),
            quiet: flags.quiet,
            debug: flags.debug,
            escape: flags.escape,
            echo: config.echo,
            prompt: config.prompt.clone(),
        }
    }

    fn prompting(&self) -> bool {
        self.interactive || !self.quiet
    }

    fn echoing(&self) -> bool {
        !self.interactive && !self.quiet && self.echo
    }
}

/// Record of one executed line
#[derive(Debug)]
pub struct Execution {
    /// Input line as read (trimmed, before escaping)
    pub line: String,
    /// Expanded command passed to `sh -c`
    pub command: String,
    pub outcome: Result<(), ExecuteError>,
    pub elapsed: Duration,
}

/// Totals for a finished loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub executed: usize,
    pub failed: usize,
}

pub struct Repl<S, R, W> {
    template: Template,
    options: ReplOptions,
    source: S,
    runner: R,
    out: W,
}

impl<S: LineSource, R: Runner, W: Write> Repl<S, R, W> {
    pub fn new(template: Template, options: ReplOptions, source: S, runner: R, out: W) -> Self {
        Repl {
            template,
            options,
            source,
            runner,
            out,
        }
    }

    /// Run until the line source is exhausted
    pub fn run(&mut self) -> io::Result<Summary> {
        let prompt = format!(
            "{} ",
            compose_prompt(
                self.template.as_str(),
                &self.options.prompt,
                self.options.debug,
                self.options.wrapped,
            )
        );

        let mut summary = Summary::default();

        loop {
            if self.options.prompting() && !self.source.draws_prompt() {
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            let input = self.source.read_line(&prompt)?;
            let line = input.text.trim();

            if self.options.echoing() {
                writeln!(self.out, "{}", line)?;
            }

            if !skipped(line) {
                let execution = self.execute(line)?;
                summary.executed += 1;
                if execution.outcome.is_err() {
                    summary.failed += 1;
                }

                // empty separator line
                if self.options.prompting() {
                    writeln!(self.out)?;
                }
            }

            if input.eof {
                break;
            }
        }

        self.out.flush()?;
        self.source.finish();
        Ok(summary)
    }

    /// Template, run and report a single line
    pub fn execute(&mut self, line: &str) -> io::Result<Execution> {
        let argument = if self.options.escape {
            shell_escape(line)
        } else {
            line.to_string()
        };

        let command = self.template.expand(&argument);
        if self.options.debug {
            self.log(&format!("sh -c '{}'", command), Color::Blue)?;
        }
        self.out.flush()?;

        let start = Instant::now();
        let outcome = self.runner.run(&command);
        let elapsed = start.elapsed();

        match &outcome {
            Ok(()) => {
                if self.options.debug {
                    let message = format!("Command took {:.2}s to execute", elapsed.as_secs_f64());
                    self.log(&message, Color::Green)?;
                }
            }
            Err(e) => {
                self.log(&e.to_string(), Color::Red)?;
                if mentions_quit(line) {
                    // the command exiting does not end the loop
                    self.log("use ^C or ^D to exit repl", Color::Yellow)?;
                }
            }
        }

        Ok(Execution {
            line: line.to_string(),
            command,
            outcome,
            elapsed,
        })
    }

    fn log(&mut self, message: &str, color: Color) -> io::Result<()> {
        writeln!(self.out, "{}", log_line(message, color))
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Blank lines and `#` comments are never executed
fn skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn mentions_quit(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("quit") || lower.contains("exit")
}
