//! Line sources for the loop
//!
//! [`StdinSource`] reads raw lines from any `BufRead` (stdin, pipes,
//! in-memory buffers). [`EditorSource`] is the built-in rustyline editor
//! used when `rlwrap` is not installed.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// One read from a line source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// Text read, terminator included if present
    pub text: String,
    /// The source is exhausted after this read
    pub eof: bool,
}

pub trait LineSource {
    /// Does the source draw the prompt itself?
    fn draws_prompt(&self) -> bool {
        false
    }

    /// Read the next line; `prompt` is only used by sources that draw it
    fn read_line(&mut self, prompt: &str) -> io::Result<Input>;

    /// Called once after the loop ends
    fn finish(&mut self) {}
}

/// Reads lines from a buffered reader
pub struct StdinSource<R> {
    reader: R,
}

impl<R: BufRead> StdinSource<R> {
    pub fn new(reader: R) -> Self {
        StdinSource { reader }
    }
}

impl<R: BufRead> LineSource for StdinSource<R> {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Input> {
        let mut buf = Vec::new();
        self.reader.read_until(b'\n', &mut buf)?;

        // a missing terminator means the stream ended
        let eof = buf.last() != Some(&b'\n');
        Ok(Input {
            text: String::from_utf8_lossy(&buf).into_owned(),
            eof,
        })
    }
}

/// Reads lines with rustyline, keeping a per-command history file
pub struct EditorSource {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(history: Option<PathBuf>) -> Result<Self, ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &history {
            // no history yet is fine
            let _ = editor.load_history(path);
        }
        Ok(EditorSource { editor, history })
    }
}

impl LineSource for EditorSource {
    fn draws_prompt(&self) -> bool {
        true
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input { text: line, eof: false })
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(Input {
                text: String::new(),
                eof: true,
            }),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }

    fn finish(&mut self) {
        if let Some(path) = &self.history {
            if let Err(e) = self.editor.save_history(path) {
                eprintln!("Warning: could not save history to {}: {}", path.display(), e);
            }
        }
    }
}
