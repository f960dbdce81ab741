//! Ctrl-C handling
//!
//! While a templated command runs, SIGINT belongs to the child: the
//! handler only records that it happened. At the prompt, Ctrl-C ends
//! repl the same way end-of-input does.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// What the SIGINT handler should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// A command is running; note it and let the child handle the signal
    Record,
    /// Back at the prompt; end the session
    Exit,
}

/// Command-running state shared with the SIGINT handler
#[derive(Debug)]
pub struct CommandState {
    /// Set before the child is spawned, cleared once it has been reaped
    running: AtomicBool,
    /// PID of the running command (or -1 if none)
    pid: AtomicI32,
    /// Set when SIGINT arrives while a command is running
    interrupted: AtomicBool,
}

impl CommandState {
    pub const fn new() -> Self {
        CommandState {
            running: AtomicBool::new(false),
            pid: AtomicI32::new(-1),
            interrupted: AtomicBool::new(false),
        }
    }

    /// Mark a command as running; must happen before spawning it
    pub fn begin(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn set_pid(&self, pid: u32) {
        self.pid.store(pid as i32, Ordering::SeqCst);
    }

    /// Back at the prompt
    pub fn end(&self) {
        self.pid.store(-1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn pid(&self) -> Option<i32> {
        let pid = self.pid.load(Ordering::SeqCst);
        if pid > 0 {
            Some(pid)
        } else {
            None
        }
    }

    /// Decide what a SIGINT means right now, recording it if a command runs
    pub fn on_interrupt(&self) -> InterruptAction {
        if self.is_running() {
            self.interrupted.store(true, Ordering::SeqCst);
            InterruptAction::Record
        } else {
            InterruptAction::Exit
        }
    }

    /// Check if the last command was interrupted and clear the flag
    pub fn take_interrupted(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

impl Default for CommandState {
    fn default() -> Self {
        Self::new()
    }
}

static COMMAND: CommandState = CommandState::new();

/// Install the SIGINT handler
pub fn setup_signal_handlers() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if COMMAND.on_interrupt() == InterruptAction::Exit {
            std::process::exit(0);
        }
    })
}

/// Mark a command as running, before it is spawned
pub fn command_starting() {
    COMMAND.begin();
}

/// Set the running command's PID
pub fn set_foreground_pid(pid: u32) {
    COMMAND.set_pid(pid);
}

/// The command has been reaped (or never started)
pub fn command_finished() {
    COMMAND.end();
}

/// Get the running command's PID (or None when at the prompt)
pub fn get_foreground_pid() -> Option<i32> {
    COMMAND.pid()
}

/// Check if the last command was interrupted and clear the flag
pub fn take_interrupted() -> bool {
    COMMAND.take_interrupted()
}
