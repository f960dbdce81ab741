//! Layered configuration: built-in defaults, then `~/.repl.conf`, then the
//! process environment. The environment always wins.
//!
//! The environment is captured once as an [`EnvMap`] snapshot and the
//! resulting [`Config`] is read-only for the rest of the run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot of the process environment
pub type EnvMap = HashMap<String, String>;

pub const PROMPT_KEY: &str = "REPL_PROMPT";
pub const HISTORY_DIR_KEY: &str = "REPL_HISTORY_DIR";
pub const COMPLETION_DIR_KEY: &str = "REPL_COMPLETION_DIR";
pub const CONF_KEY: &str = "REPL_CONF";
pub const DEBUG_KEY: &str = "REPL_DEBUG";
pub const QUIET_KEY: &str = "REPL_QUIET";
pub const ECHO_KEY: &str = "REPL_ECHO";

const DEFAULT_PROMPT: &str = ">>";

/// Capture the current process environment
pub fn env_snapshot() -> EnvMap {
    std::env::vars().collect()
}

/// Parsed `key=value` config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfFile {
    entries: Vec<(String, String)>,
}

impl ConfFile {
    /// Parse config file content
    ///
    /// Blank lines and `#` comments are skipped, as are lines without a
    /// key. Values may be wrapped in double quotes.
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let value = value.trim();
            let value = value.strip_prefix('"').unwrap_or(value);
            let value = value.strip_suffix('"').unwrap_or(value);

            entries.push((key.to_string(), value.to_string()));
        }

        ConfFile { entries }
    }

    /// Read and parse a config file; a missing or unreadable file is empty
    pub fn read(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Value for `key`; the first occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// Resolved, immutable configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub history_dir: PathBuf,
    pub completion_dir: PathBuf,
    pub conf_path: PathBuf,
    pub debug: bool,
    pub quiet: bool,
    /// Echo piped input lines back to the output
    pub echo: bool,
    /// Config file entries not overridden by the environment
    pub file_vars: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Config::resolve(&EnvMap::new(), &ConfFile::default())
    }
}

impl Config {
    /// Load configuration for this process
    ///
    /// A wrapped child skips the config file: its parent already exported
    /// the file's values into the environment before relaunching.
    pub fn load(env: &EnvMap, wrapped: bool) -> Self {
        let file = if wrapped {
            ConfFile::default()
        } else {
            ConfFile::read(&conf_path(env))
        };
        Config::resolve(env, &file)
    }

    /// Layer defaults, file values and environment values
    pub fn resolve(env: &EnvMap, file: &ConfFile) -> Self {
        let home = env.get("HOME").cloned().unwrap_or_default();
        let lookup = |key: &str| env.get(key).map(String::as_str).or_else(|| file.get(key));

        let history_dir = lookup(HISTORY_DIR_KEY)
            .map(|dir| absolute(dir, &home))
            .unwrap_or_else(|| absolute(&home, &home));

        let completion_dir = lookup(COMPLETION_DIR_KEY)
            .map(|dir| absolute(dir, &home))
            .unwrap_or_else(|| absolute(&home, &home).join(".repl"));

        let file_vars = file
            .entries()
            .iter()
            .filter(|(key, _)| !env.contains_key(key))
            .cloned()
            .collect();

        Config {
            prompt: lookup(PROMPT_KEY).unwrap_or(DEFAULT_PROMPT).to_string(),
            history_dir,
            completion_dir,
            conf_path: conf_path(env),
            debug: lookup(DEBUG_KEY).map(parse_bool).unwrap_or(false),
            quiet: lookup(QUIET_KEY).map(parse_bool).unwrap_or(false),
            echo: lookup(ECHO_KEY).map(parse_bool).unwrap_or(true),
            file_vars,
        }
    }

    /// Command-specific history file, if the history directory exists
    pub fn history_file_for(&self, command: &str) -> Option<PathBuf> {
        if self.history_dir.is_dir() {
            Some(self.history_dir.join(format!(".{}_history", command)))
        } else {
            None
        }
    }

    /// Command-specific completion file, if it exists
    pub fn completion_file_for(&self, command: &str) -> Option<PathBuf> {
        let path = self.completion_dir.join(command);
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }
}

/// Location of the config file: `$REPL_CONF` or `~/.repl.conf`
fn conf_path(env: &EnvMap) -> PathBuf {
    let home = env.get("HOME").cloned().unwrap_or_default();
    match env.get(CONF_KEY) {
        Some(path) => absolute(path, &home),
        None => absolute(&home, &home).join(".repl.conf"),
    }
}

/// Parse a boolean the way `strconv.ParseBool`-style config values read
///
/// Unrecognised values are false.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Expand a leading `~` and make the path absolute against the current directory
fn absolute(path: &str, home: &str) -> PathBuf {
    let expanded = if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        Path::new(home).join(rest)
    } else {
        PathBuf::from(path)
    };

    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_skips_blanks_and_comments() {
        let file = ConfFile::parse("\n# a comment\n   \nREPL_PROMPT=$\n  # indented comment\n");
        assert_eq!(file.entries(), &[("REPL_PROMPT".to_string(), "$".to_string())]);
    }

    #[test]
    fn parse_strips_quotes_and_spaces() {
        let file = ConfFile::parse("REPL_PROMPT = \"=> \"\nNAME=\"plain\"");
        assert_eq!(file.get("REPL_PROMPT"), Some("=> "));
        assert_eq!(file.get("NAME"), Some("plain"));
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let file = ConfFile::parse("no equals sign\n=value\nGOOD=yes");
        assert_eq!(file.entries().len(), 1);
        assert_eq!(file.get("GOOD"), Some("yes"));
    }

    #[test]
    fn value_may_contain_equals() {
        let file = ConfFile::parse("OPTS=a=b");
        assert_eq!(file.get("OPTS"), Some("a=b"));
    }

    #[test]
    fn defaults_without_sources() {
        let config = Config::resolve(&env(&[("HOME", "/home/u")]), &ConfFile::default());
        assert_eq!(config.prompt, ">>");
        assert_eq!(config.history_dir, PathBuf::from("/home/u"));
        assert_eq!(config.completion_dir, PathBuf::from("/home/u/.repl"));
        assert_eq!(config.conf_path, PathBuf::from("/home/u/.repl.conf"));
        assert!(!config.debug);
        assert!(!config.quiet);
        assert!(config.echo);
        assert!(config.file_vars.is_empty());
    }

    #[test]
    fn file_beats_default() {
        let file = ConfFile::parse("REPL_PROMPT=%\nREPL_DEBUG=true\nREPL_HISTORY_DIR=/tmp/hist");
        let config = Config::resolve(&env(&[("HOME", "/home/u")]), &file);
        assert_eq!(config.prompt, "%");
        assert!(config.debug);
        assert_eq!(config.history_dir, PathBuf::from("/tmp/hist"));
    }

    #[test]
    fn environment_beats_file() {
        let file = ConfFile::parse("REPL_PROMPT=%\nREPL_QUIET=true\nEDITOR=vi");
        let config = Config::resolve(
            &env(&[("HOME", "/home/u"), ("REPL_PROMPT", "$"), ("REPL_QUIET", "false")]),
            &file,
        );
        assert_eq!(config.prompt, "$");
        assert!(!config.quiet);
        assert_eq!(config.file_vars, vec![("EDITOR".to_string(), "vi".to_string())]);
    }

    #[test]
    fn conf_path_from_environment_with_tilde() {
        let config = Config::resolve(
            &env(&[("HOME", "/home/u"), ("REPL_CONF", "~/cfg/repl.conf")]),
            &ConfFile::default(),
        );
        assert_eq!(config.conf_path, PathBuf::from("/home/u/cfg/repl.conf"));
    }

    #[test]
    fn bool_parsing() {
        for value in ["1", "t", "T", "TRUE", "true", "True", " true "] {
            assert!(parse_bool(value), "{value}");
        }
        for value in ["0", "false", "yes", "", "on"] {
            assert!(!parse_bool(value), "{value}");
        }
    }

    #[test]
    fn load_reads_file_unless_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("repl.conf");
        fs::write(&conf, "REPL_PROMPT=\"file>\"\n").unwrap();

        let vars = env(&[
            ("HOME", dir.path().to_str().unwrap()),
            ("REPL_CONF", conf.to_str().unwrap()),
        ]);

        assert_eq!(Config::load(&vars, false).prompt, "file>");
        assert_eq!(Config::load(&vars, true).prompt, ">>");
    }

    #[test]
    fn missing_file_is_empty() {
        let file = ConfFile::read(Path::new("/nonexistent/repl.conf"));
        assert!(file.entries().is_empty());
    }

    #[test]
    fn history_file_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            history_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert_eq!(
            config.history_file_for("git"),
            Some(dir.path().join(".git_history"))
        );

        let missing = Config {
            history_dir: dir.path().join("missing"),
            ..Config::default()
        };
        assert_eq!(missing.history_file_for("git"), None);
    }

    #[test]
    fn completion_file_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("git"), "commit\npush\n").unwrap();
        let config = Config {
            completion_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert_eq!(config.completion_file_for("git"), Some(dir.path().join("git")));
        assert_eq!(config.completion_file_for("brew"), None);
    }
}
