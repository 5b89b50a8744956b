//! Prompt-line hint extraction from the raw (escape-bearing) buffer.
//!
//! Two hints live only in the styled buffer and are gone after stripping:
//! the permission-mode banner (`⏵⏵ bypass permissions on (shift+Tab ...`)
//! and the dim-rendered autocomplete suggestion on the prompt line. Both
//! are scanned bottom-up, newest first.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::classify::PROMPT_MARKER;
use crate::strip::strip_ansi;

/// Permission modes the assistant UI is known to announce. Candidates
/// outside this set are ignored to avoid false positives.
pub const KNOWN_MODES: [&str; 3] = ["bypass permissions on", "accept edits on", "plan mode"];

// Mode banner: ⏵⏵ <mode> (shift+Tab to cycle)
static MODE_HINT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)⏵⏵\s*(.+?)\s*\(shift\+Tab"));

// Dim SGR run (ESC[2m or ESC[0;2m), tolerating interleaved color codes,
// capturing the dim text itself.
static DIM_TEXT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\x1b\[(?:0;)?2m(?:\x1b\[[0-9;]*m)*([^\x1b]+)"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern")
}

/// Hints recovered from the styled prompt area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptHints {
    /// Active permission mode, if a known one is announced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Autocomplete suggestion: typed prefix plus dim completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Scan the raw buffer bottom-up for mode and suggestion hints.
#[must_use]
pub fn extract_hints(raw: &str) -> PromptHints {
    let mut hints = PromptHints::default();

    for line in raw.lines().rev() {
        let clean = strip_ansi(line);
        let clean = clean.trim();

        if hints.mode.is_none() {
            if let Some(caps) = MODE_HINT.captures(clean) {
                if let Some(candidate) = caps.get(1) {
                    let candidate = candidate.as_str().trim().to_lowercase();
                    if KNOWN_MODES.contains(&candidate.as_str()) {
                        hints.mode = Some(candidate);
                    }
                }
            }
        }

        if hints.suggestion.is_none() {
            if let Some(idx) = line.find(PROMPT_MARKER) {
                let after_prompt = &line[idx + PROMPT_MARKER.len_utf8()..];
                if let Some(caps) = DIM_TEXT.captures(after_prompt) {
                    if let (Some(whole), Some(dim)) = (caps.get(0), caps.get(1)) {
                        let dim_text = dim.as_str().trim();
                        if !dim_text.is_empty() {
                            let typed = strip_ansi(&after_prompt[..whole.start()]);
                            let typed = typed.trim();
                            hints.suggestion = Some(format!("{typed}{dim_text}").trim().to_string());
                        }
                    }
                }
            }
        }

        if hints.mode.is_some() && hints.suggestion.is_some() {
            break;
        }
    }

    hints
}
