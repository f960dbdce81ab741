//! Shell quoting for user input

/// Characters that never need quoting, besides ASCII alphanumerics and `_`
const SAFE_PUNCTUATION: &[char] = &['@', '%', '+', '=', ':', ',', '.', '/', '-'];

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || SAFE_PUNCTUATION.contains(&c)
}

/// Turn an arbitrary string into a single shell-safe token
///
/// - `""` becomes `''`
/// - strings made only of safe characters pass through unchanged
/// - anything else is single-quoted, with embedded `'` written as `'"'"'`
pub fn shell_escape(input: &str) -> String {
    if input.is_empty() {
        return "''".to_string();
    }

    if input.chars().all(is_safe) {
        return input.to_string();
    }

    format!("'{}'", input.replace('\'', "'\"'\"'"))
}
