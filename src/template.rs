//! Command templates with a single substitution marker

use crate::flags::Flags;
use thiserror::Error;

/// The placeholder replaced by each input line
pub const MARKER: &str = "%s";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("No command specified... use `--help`")]
    NoCommand,
}

/// A shell command containing the substitution marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Build a template from the command words left after flag removal
    pub fn build(words: &[String], flags: &Flags) -> Result<Self, TemplateError> {
        let command = words.join(" ").trim().to_string();
        if command.is_empty() {
            return Err(TemplateError::NoCommand);
        }

        let text = if flags.stdin {
            let feeder = if flags.printf { "printf" } else { "echo" };
            format!("{} \"{}\" | {}", feeder, MARKER, command)
        } else if command.contains(MARKER) {
            command
        } else {
            format!("{} {}", command, MARKER)
        };

        Ok(Template { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substitute `input` for the marker
    pub fn expand(&self, input: &str) -> String {
        self.text.replace(MARKER, input)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &[&str]) -> Vec<String> {
        s.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn marker_appended_when_missing() {
        let t = Template::build(&words(&["curl", "-s"]), &Flags::default()).unwrap();
        assert_eq!(t.as_str(), "curl -s %s");
        assert_eq!(t.as_str().matches(MARKER).count(), 1);
        assert!(t.as_str().ends_with(MARKER));
    }

    #[test]
    fn embedded_marker_kept() {
        let t = Template::build(&words(&["curl", "http://host/%s"]), &Flags::default()).unwrap();
        assert_eq!(t.as_str(), "curl http://host/%s");
    }

    #[test]
    fn rebuilding_is_a_no_op() {
        let first = Template::build(&words(&["grep", "-r"]), &Flags::default()).unwrap();
        let second = Template::build(&[first.to_string()], &Flags::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stdin_mode_uses_echo() {
        let flags = Flags { stdin: true, ..Flags::default() };
        let t = Template::build(&words(&["wc", "-c"]), &flags).unwrap();
        assert_eq!(t.as_str(), "echo \"%s\" | wc -c");
    }

    #[test]
    fn stdin_mode_with_printf() {
        let flags = Flags { stdin: true, printf: true, ..Flags::default() };
        let t = Template::build(&words(&["wc", "-c"]), &flags).unwrap();
        assert_eq!(t.as_str(), "printf \"%s\" | wc -c");
    }

    #[test]
    fn empty_command_rejected() {
        assert_eq!(Template::build(&[], &Flags::default()), Err(TemplateError::NoCommand));
        assert_eq!(
            Template::build(&words(&["  ", ""]), &Flags::default()),
            Err(TemplateError::NoCommand)
        );
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let t = Template::build(&words(&[" ls "]), &Flags::default()).unwrap();
        assert_eq!(t.as_str(), "ls %s");
    }

    #[test]
    fn expand_substitutes_input() {
        let t = Template::build(&words(&["echo"]), &Flags::default()).unwrap();
        assert_eq!(t.expand("hello"), "echo hello");
    }
}
