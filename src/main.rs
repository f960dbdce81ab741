//! repl - sort of a REPL for any command
//!
//! Usage:
//!   repl [options] command ...

use repl::display::{log_line, Color};
use repl::relaunch::{self, Gate, System};
use repl::{
    config, signals, Config, EditorSource, Flags, Invocation, LineSource, Repl, ReplOptions,
    ShellRunner, StdinSource, Template,
};
use std::fmt::Display;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let env = config::env_snapshot();
    let ctx = Invocation::detect(std::env::args().collect(), &env);
    let host = System::new(&env);

    // may replace this process and never return
    let config = match relaunch::gate(&ctx, &env, &host) {
        Ok(Gate::Run(config)) => config,
        Ok(Gate::Exit) => return ExitCode::SUCCESS,
        Err(e) => return fatal(e),
    };

    let mut words = ctx.rest().to_vec();
    let flags = Flags::extract(&mut words, &config);

    let template = match Template::build(&words, &flags) {
        Ok(template) => template,
        Err(e) => {
            println!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = signals::setup_signal_handlers() {
        eprintln!("Warning: Ctrl-C handler not installed: {}", e);
    }

    let options = ReplOptions::new(&ctx, &config, &flags);

    // interactive but not wrapped: rlwrap is not installed
    let result = if ctx.interactive && !ctx.wrapped() {
        match editor_for(&ctx, &config) {
            Ok(source) => run(template, options, source, &config),
            Err(e) => {
                eprintln!("Warning: line editing unavailable: {}", e);
                run(template, options, StdinSource::new(io::stdin().lock()), &config)
            }
        }
    } else {
        run(template, options, StdinSource::new(io::stdin().lock()), &config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fatal(e),
    }
}

fn editor_for(ctx: &Invocation, config: &Config) -> Result<EditorSource, rustyline::error::ReadlineError> {
    let history = relaunch::target_command(ctx).and_then(|command| config.history_file_for(&command));
    EditorSource::new(history)
}

fn run<S: LineSource>(template: Template, options: ReplOptions, source: S, config: &Config) -> io::Result<()> {
    let runner = ShellRunner::new(config.file_vars.clone());
    Repl::new(template, options, source, runner, io::stdout()).run()?;
    Ok(())
}

fn fatal(error: impl Display) -> ExitCode {
    eprintln!("{}", log_line(&error.to_string(), Color::Red));
    ExitCode::FAILURE
}
