//! Escape-sequence stripping and terminal-noise filtering.
//!
//! The first pipeline stage: removes ANSI CSI/Fe sequences and stray C0
//! control bytes, and recognizes whole lines that are terminal chrome
//! (logo banner, shell prompts, vim mode indicators, decorative rules,
//! permission hints, spinner lines). Classification never sees those
//! lines; they carry no conversational content.

use std::sync::LazyLock;

use regex::Regex;

/// Spinner glyphs drawn by the assistant UI while a tool or thought is in
/// flight. Lines starting with one of these are transient chrome.
pub const SPINNER_GLYPHS: [char; 7] = ['✽', '✶', '⋮', '◐', '◑', '◒', '◓'];

// ESC followed by a 7-bit Fe byte, or a full CSI sequence
// (parameter bytes, intermediate bytes, final byte).
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])"));

// Remaining C0 controls and DEL, keeping \t and \n.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]"));

// Shell prompt echo: optional parenthesized env tags (possibly repeated),
// then user@host: and a path.
static SHELL_PROMPT: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\([^)]+\)\s*)*\w+@\w+:"));

// Editor modal indicator: -- INSERT --, -- NORMAL -- (trailing hints ok).
static EDITOR_MODE: LazyLock<Regex> = LazyLock::new(|| compile(r"^--\s*\w+\s*--"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern")
}

/// Remove ANSI escape sequences and stray control characters.
///
/// All other characters, including the marker glyphs and box-drawing
/// symbols the classifier relies on, pass through verbatim. Stripping an
/// already-clean string is a no-op.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let text = ANSI_ESCAPE.replace_all(text, "");
    CONTROL_CHARS.replace_all(&text, "").into_owned()
}

/// Whether a cleaned line is terminal noise with no transcript content.
///
/// Blank lines count as noise here; the reducer handles blanks separately
/// before consulting this filter so paragraph breaks survive.
#[must_use]
pub fn is_noise_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }
    if line.starts_with(SPINNER_GLYPHS) {
        return true;
    }
    // Product logo banner rows.
    if line.starts_with("▐▛") || line.starts_with("▝▜") {
        return true;
    }
    if let Some(rest) = line.strip_prefix("▘▘") {
        if rest.trim_start().starts_with("▝▝") {
            return true;
        }
    }
    // Decorative horizontal rule.
    if line.chars().all(|c| c == '─') {
        return true;
    }
    // Permission hint arrows and the bypass notice render anywhere in line.
    if line.starts_with('⏵') || line.contains("bypass permissions") {
        return true;
    }
    if line.starts_with("(Esc to interrupt") || line.starts_with("Tips for getting") {
        return true;
    }
    SHELL_PROMPT.is_match(line) || EDITOR_MODE.is_match(line)
}
