//! Session-state detection over the tail of the cleaned buffer.
//!
//! Reasons over raw cleaned lines, not sealed messages, so a spinner or a
//! half-drawn prompt still counts even though the noise filter would drop
//! it before classification. `Idle` is the safe default on ambiguity.

use crate::classify::{
    is_marker_line, BULLET_MARKER, CONTINUATION_MARKER, OUTPUT_MARKER, PROMPT_MARKER,
};
use crate::message::SessionState;
use crate::strip::SPINNER_GLYPHS;

/// Non-empty lines inspected from the end of the buffer.
const RECENT_WINDOW: usize = 10;
/// Most-recent lines scanned for spinner / in-flight signals.
const ACTIVITY_WINDOW: usize = 5;

/// Detect the session state from cleaned buffer lines.
///
/// Checks, in priority order: an empty prompt waiting for input, spinner
/// or "thinking" activity, streaming tool output, and finally tool
/// activity followed by plain response text.
#[must_use]
pub fn detect_state<'a, I>(lines: I) -> SessionState
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: DoubleEndedIterator,
{
    // Most-recent-first window of non-empty lines.
    let recent: Vec<&str> = lines
        .into_iter()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(RECENT_WINDOW)
        .collect();

    let Some(&last) = recent.first() else {
        return SessionState::Idle;
    };

    // Prompt with nothing typed: waiting for input.
    if last.ends_with(PROMPT_MARKER) {
        return SessionState::Idle;
    }

    for line in recent.iter().take(ACTIVITY_WINDOW) {
        if line.starts_with(SPINNER_GLYPHS) {
            return SessionState::Working;
        }
        let lower = line.to_lowercase();
        if lower.contains("thinking") || lower.contains("orchestrating") {
            return SessionState::Working;
        }
    }

    for (idx, line) in recent.iter().take(ACTIVITY_WINDOW).enumerate() {
        // A bullet with nothing after it yet: tool still in flight.
        if line.starts_with(BULLET_MARKER) && idx == 0 {
            return SessionState::Working;
        }
        // Continuation markers with no plain text after them: output is
        // still streaming. Plain text below the marker means the response
        // already landed; the Done scan decides.
        if line.starts_with(OUTPUT_MARKER) || line.starts_with(CONTINUATION_MARKER) {
            let newer_plain = recent[..idx].iter().any(|l| !is_marker_line(l));
            if !newer_plain {
                return SessionState::Working;
            }
        }
    }

    // Oldest-to-newest: tool activity followed later by plain text means
    // the response has landed.
    let mut saw_tool = false;
    for line in recent.iter().rev() {
        if line.starts_with(BULLET_MARKER) || line.starts_with(OUTPUT_MARKER) {
            saw_tool = true;
        } else if saw_tool && !is_marker_line(line) {
            return SessionState::Done;
        }
    }

    SessionState::Idle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> SessionState {
        detect_state(text.split('\n'))
    }

    #[test]
    fn empty_buffer_is_idle() {
        assert_eq!(detect(""), SessionState::Idle);
        assert_eq!(detect("\n\n  \n"), SessionState::Idle);
    }

    #[test]
    fn bare_prompt_is_idle() {
        assert_eq!(detect("some earlier output\n❯"), SessionState::Idle);
        assert_eq!(detect("output\n  ❯  "), SessionState::Idle);
    }

    #[test]
    fn spinner_line_is_working() {
        assert_eq!(detect("● Bash(ls)\n✽ Thinking…"), SessionState::Working);
        assert_eq!(detect("◓ munching"), SessionState::Working);
    }

    #[test]
    fn thinking_text_is_working() {
        assert_eq!(detect("some output\nThinking about the answer"), SessionState::Working);
        assert_eq!(detect("Orchestrating subtasks"), SessionState::Working);
    }

    #[test]
    fn trailing_bullet_is_working() {
        assert_eq!(detect("❯ run tests\n● Bash(npm test)"), SessionState::Working);
    }

    #[test]
    fn streaming_output_is_working() {
        assert_eq!(detect("● Bash(npm test)\n⎿  running suite"), SessionState::Working);
        assert_eq!(detect("● Bash(npm test)\n… partial"), SessionState::Working);
    }

    #[test]
    fn tool_then_plain_text_is_done() {
        let buffer = "● Bash(git push)\n⎿  done pushing\nAll changes are on main now.";
        assert_eq!(detect(buffer), SessionState::Done);
    }

    #[test]
    fn plain_text_only_is_idle() {
        assert_eq!(detect("just some prose\nmore prose"), SessionState::Idle);
    }

    #[test]
    fn window_is_capped_at_ten_lines() {
        // Tool activity scrolled past the window no longer counts.
        let mut lines: Vec<String> = vec!["● Bash(ls)".to_string()];
        for i in 0..12 {
            lines.push(format!("prose line {i}"));
        }
        let buffer = lines.join("\n");
        assert_eq!(detect(&buffer), SessionState::Idle);
    }
}
