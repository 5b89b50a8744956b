//! Per-line classification by leading marker glyph.
//!
//! One cleaned line maps to exactly one [`LineKind`]; the reducer handles
//! the kinds with a single match. All matchers are cheap prefix checks —
//! no regex backtracking on the hot path.

/// Prompt glyph preceding user input.
pub const PROMPT_MARKER: char = '❯';
/// Bullet glyph opening a tool invocation or a summary line.
pub const BULLET_MARKER: char = '●';
/// Bent-arrow glyph prefixing tool output / continuation lines.
pub const OUTPUT_MARKER: char = '⎿';
/// Ellipsis continuation glyph (same role as the bent arrow).
pub const CONTINUATION_MARKER: char = '…';
/// Completed-task glyph.
pub const TASK_MARKER: char = '✔';
/// Pending-task glyph (only consulted by state detection).
pub const PENDING_MARKER: char = '☐';
/// Error glyph.
pub const ERROR_MARKER: char = '✘';

/// Classification of one cleaned, non-noise line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Whitespace-only line.
    Blank,
    /// Line carrying the prompt glyph; `input` is the text after it.
    Prompt { input: &'a str },
    /// Bullet line; tool-vs-summary disambiguation happens in the reducer.
    Bullet { text: &'a str },
    /// Tool output or continuation line.
    Output { text: &'a str },
    /// Completed task line.
    Task { text: &'a str },
    /// Error line.
    Error { text: &'a str },
    /// Anything else: prose.
    Plain { text: &'a str },
}

/// Classify a single cleaned line by its leading marker glyph.
///
/// The prompt glyph wins anywhere in the line (the UI indents it); the
/// remaining markers must lead the trimmed line. Unrecognized glyphs fall
/// through to [`LineKind::Plain`].
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(idx) = trimmed.find(PROMPT_MARKER) {
        let input = trimmed[idx + PROMPT_MARKER.len_utf8()..].trim();
        return LineKind::Prompt { input };
    }

    if let Some(rest) = trimmed.strip_prefix(BULLET_MARKER) {
        return LineKind::Bullet { text: rest.trim() };
    }

    if let Some(rest) = trimmed
        .strip_prefix(OUTPUT_MARKER)
        .or_else(|| trimmed.strip_prefix(CONTINUATION_MARKER))
    {
        return LineKind::Output { text: rest.trim() };
    }

    if let Some(rest) = trimmed.strip_prefix(TASK_MARKER) {
        return LineKind::Task { text: rest.trim() };
    }

    if let Some(rest) = trimmed.strip_prefix(ERROR_MARKER) {
        return LineKind::Error { text: rest.trim() };
    }

    LineKind::Plain { text: trimmed }
}

/// Extract the tool identifier from bullet text shaped like `Name(args)`.
///
/// The identifier must start with an uppercase ASCII letter, continue with
/// word characters, and touch the opening parenthesis — no space tolerated.
/// Everything else is a summary line.
#[must_use]
pub fn tool_invocation(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    for (idx, ch) in chars {
        if ch == '(' {
            return Some(&text[..idx]);
        }
        if !(ch.is_ascii_alphanumeric() || ch == '_') {
            return None;
        }
    }
    None
}

/// Whether a line starts with any transcript marker glyph.
///
/// Used by state detection to separate marker lines from plain response
/// text in the tail window.
#[must_use]
pub fn is_marker_line(line: &str) -> bool {
    line.starts_with([
        PROMPT_MARKER,
        BULLET_MARKER,
        OUTPUT_MARKER,
        CONTINUATION_MARKER,
        TASK_MARKER,
        PENDING_MARKER,
        ERROR_MARKER,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_marker_lines() {
        assert_eq!(
            classify_line("❯ commit and push"),
            LineKind::Prompt {
                input: "commit and push"
            }
        );
        assert_eq!(
            classify_line("● Bash(git push)"),
            LineKind::Bullet {
                text: "Bash(git push)"
            }
        );
        assert_eq!(
            classify_line("⎿  dev -> dev"),
            LineKind::Output { text: "dev -> dev" }
        );
        assert_eq!(
            classify_line("… still going"),
            LineKind::Output {
                text: "still going"
            }
        );
        assert_eq!(
            classify_line("✔ Build completed"),
            LineKind::Task {
                text: "Build completed"
            }
        );
        assert_eq!(
            classify_line("✘ Command failed"),
            LineKind::Error {
                text: "Command failed"
            }
        );
        assert_eq!(classify_line("plain prose"), LineKind::Plain { text: "plain prose" });
        assert_eq!(classify_line("   "), LineKind::Blank);
    }

    #[test]
    fn prompt_wins_anywhere_in_line() {
        assert_eq!(classify_line("  ❯ hello"), LineKind::Prompt { input: "hello" });
        assert_eq!(classify_line("❯"), LineKind::Prompt { input: "" });
    }

    #[test]
    fn tool_invocation_requires_tight_paren() {
        assert_eq!(tool_invocation("Bash(git push)"), Some("Bash"));
        assert_eq!(tool_invocation("Read(file.txt)"), Some("Read"));
        assert_eq!(tool_invocation("Write(path/to/file.py)"), Some("Write"));
        assert_eq!(tool_invocation("Edit(/home/user/file.js)"), Some("Edit"));
        assert_eq!(tool_invocation("Task()"), Some("Task"));
        assert_eq!(tool_invocation("Bash (git status)"), None);
        assert_eq!(tool_invocation("Done. Committed"), None);
        assert_eq!(tool_invocation("Deployment successful!"), None);
        assert_eq!(tool_invocation("I have completed the task."), None);
        assert_eq!(tool_invocation("123(test)"), None);
        assert_eq!(tool_invocation("bash(git)"), None);
        assert_eq!(tool_invocation(""), None);
    }

    #[test]
    fn marker_line_check_covers_all_glyphs() {
        for line in ["❯ x", "● x", "⎿ x", "… x", "✔ x", "☐ x", "✘ x"] {
            assert!(is_marker_line(line), "{line}");
        }
        assert!(!is_marker_line("plain"));
    }
}
