//! Common test utilities for repl integration tests

pub use repl::display::strip_ansi;
pub use repl::{ExecuteError, Flags, Repl, ReplOptions, Runner, StdinSource, Summary, Template};
use std::io::Cursor;

/// Runner that counts launches instead of spawning processes
#[derive(Default)]
pub struct CountingRunner {
    pub commands: Vec<String>,
    /// Exit status returned for every command
    pub status: i32,
}

impl Runner for CountingRunner {
    fn run(&mut self, command: &str) -> Result<(), ExecuteError> {
        self.commands.push(command.to_string());
        if self.status == 0 {
            Ok(())
        } else {
            Err(ExecuteError::ExitStatus(self.status))
        }
    }
}

/// Options for a piped, non-quiet session
#[allow(dead_code)]
pub fn piped() -> ReplOptions {
    ReplOptions {
        interactive: false,
        wrapped: false,
        quiet: false,
        debug: false,
        escape: false,
        echo: true,
        prompt: ">>".to_string(),
    }
}

#[allow(dead_code)]
pub fn template(words: &[&str]) -> Template {
    let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    Template::build(&words, &Flags::default()).unwrap()
}

/// Run a whole session; returns the summary, launched commands and plain output
#[allow(dead_code)]
pub fn session(
    template: Template,
    options: ReplOptions,
    input: &str,
    status: i32,
) -> (Summary, Vec<String>, String) {
    let runner = CountingRunner { status, ..CountingRunner::default() };
    let mut repl = Repl::new(
        template,
        options,
        StdinSource::new(Cursor::new(input.to_string())),
        runner,
        Vec::new(),
    );

    let summary = repl.run().unwrap();
    let commands = repl.runner().commands.clone();
    let output = strip_ansi(&String::from_utf8(repl.into_output()).unwrap());
    (summary, commands, output)
}
