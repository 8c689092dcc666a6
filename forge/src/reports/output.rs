//! Output trait for rendering reports.

/// Width of the `── label ───` rule drawn above previews.
const RULE_WIDTH: usize = 60;

/// Level of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        }
    }

    /// Errors and warnings go to stderr so a previewed module on stdout
    /// stays clean.
    pub fn is_stderr(self) -> bool {
        !matches!(self, Level::Info)
    }
}

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an added item (e.g., new file).
    fn added_item(&mut self, text: &str);

    /// Render a diagnostic. Continuation lines (`  --> bot.modules`) are
    /// part of `message`.
    fn diagnostic(&mut self, level: Level, message: &str);

    /// Render a block of generated or template code under a labelled rule.
    fn code(&mut self, label: &str, text: &str);

    /// Render a separator/divider with a label.
    fn divider(&mut self, label: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// `── label ─────…` padded to a fixed width.
pub(crate) fn rule(label: &str) -> String {
    let head = format!("── {} ", label);
    let used = head.chars().count();
    format!("{}{}", head, "─".repeat(RULE_WIDTH.saturating_sub(used).max(2)))
}

/// Diagnostic text with the level prefixed to its first line.
pub(crate) fn diagnostic_text(level: Level, message: &str) -> String {
    format!("{}: {}", level.label(), message)
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn diagnostic(&mut self, level: Level, message: &str) {
        let text = diagnostic_text(level, message);
        if level.is_stderr() {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    fn code(&mut self, label: &str, text: &str) {
        let lines = text.lines().count();
        println!("{}", rule(&format!("{} ({} lines)", label, lines)));
        // Generated modules end with a line break already
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }

    fn divider(&mut self, label: &str) {
        println!("{}", rule(label));
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_is_padded() {
        let line = rule("bot_1.py");
        assert!(line.starts_with("── bot_1.py ─"));
        assert_eq!(line.chars().count(), RULE_WIDTH);
    }

    #[test]
    fn test_rule_keeps_long_labels() {
        let label = "x".repeat(RULE_WIDTH);
        let line = rule(&label);
        assert!(line.contains(&label));
        assert!(line.ends_with("──"));
    }

    #[test]
    fn test_diagnostic_streams() {
        assert!(Level::Error.is_stderr());
        assert!(Level::Warning.is_stderr());
        assert!(!Level::Info.is_stderr());
        assert_eq!(
            diagnostic_text(Level::Warning, "unsupported modules value\n  --> bot.modules"),
            "warning: unsupported modules value\n  --> bot.modules"
        );
    }
}
