//! Display formatting for terminal output
//!
//! Colours, the framed `===[message]====` log line used for every
//! diagnostic the loop prints, and prompt composition.

/// Overall width of a framed log line
pub const LOG_WIDTH: usize = 78;

/// Characters taken by the `===[]==` frame
const FRAME_WIDTH: usize = 7;

/// ANSI colours and attributes used by repl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    Bold,
    Invert,
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Reset => "\x1b[0m",
            Color::Bold => "\x1b[1m",
            Color::Invert => "\x1b[7m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
        }
    }
}

/// Wrap text in a colour code and a trailing reset
pub fn paint(text: &str, color: Color) -> String {
    format!("{}{}{}", color.code(), text, Color::Reset.code())
}

/// Remove ANSI SGR sequences (`ESC [ ... m`) from text
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    out
}

/// Render a framed, coloured log line: `===[message]==` padded with `=`
///
/// Messages longer than the budget are cut and suffixed with `...`.
pub fn log_line(message: &str, color: Color) -> String {
    let budget = LOG_WIDTH - FRAME_WIDTH;
    let length = message.chars().count();

    let shown: String = if length > budget {
        let mut cut: String = message.chars().take(budget - 3).collect();
        cut.push_str("...");
        cut
    } else {
        message.to_string()
    };

    let padding = "=".repeat(budget - shown.chars().count());
    format!("===[{}]=={}", paint(&shown, color), padding)
}

/// Compose the prompt shown before each input line
///
/// Debug mode annotates the template with the wrapping context.
pub fn compose_prompt(template: &str, suffix: &str, debug: bool, wrapped: bool) -> String {
    let quoted = format!("\"{}\"", paint(template, Color::Blue));

    let annotated = match (debug, wrapped) {
        (true, true) => format!("rlwrap(repl({}))", quoted),
        (true, false) => format!("repl({})", quoted),
        (false, _) => quoted,
    };

    format!("{} {}", annotated, suffix)
}
