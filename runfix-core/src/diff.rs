use nu_ansi_term::{Color as AnsiColor, Style};
use similar::TextDiff;
use std::fmt::Write;

/// Unified diff of a file's rewrite, labelled with `file` on both sides.
pub fn unified_diff(file: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(file, file)
        .to_string()
}

/// Color a unified diff line by line for terminal output
pub fn colorize_diff(diff: &str) -> String {
    let mut output = String::new();

    for line in diff.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };

        let painted = if body.starts_with("+++") || body.starts_with("---") {
            Style::new().fg(AnsiColor::White).bold().paint(body)
        } else if body.starts_with("@@") {
            Style::new().fg(AnsiColor::Cyan).paint(body)
        } else if body.starts_with('+') {
            Style::new().fg(AnsiColor::Green).paint(body)
        } else if body.starts_with('-') {
            Style::new().fg(AnsiColor::Red).paint(body)
        } else {
            Style::new().paint(body)
        };

        write!(output, "{}{}", painted, newline).unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_diff_headers_and_lines() {
        let diff = unified_diff("a.yaml", "one\ntwo\n", "one\nthree\n");
        assert!(diff.starts_with("--- a.yaml\n+++ a.yaml\n"));
        assert!(diff.contains("-two\n"));
        assert!(diff.contains("+three\n"));
    }

    #[test]
    fn test_identical_content_has_no_hunks() {
        let diff = unified_diff("a.yaml", "same\n", "same\n");
        assert!(!diff.contains("@@"));
    }

    #[test]
    fn test_colorize_keeps_text() {
        let diff = unified_diff("a.yaml", "one\n", "two\n");
        let colored = colorize_diff(&diff);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("two"));
        assert_eq!(colored.lines().count(), diff.lines().count());
    }
}
