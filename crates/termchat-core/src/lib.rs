//! Pure parsing pipeline for captured coding-assistant terminal sessions.
//!
//! Turns a raw, ANSI-laden scrollback capture into a structured sequence
//! of typed messages plus a coarse session state, in three stages:
//!
//! 1. escape/noise stripping ([`strip`])
//! 2. line classification and stateful reduction ([`classify`], [`reduce`])
//! 3. tail-window state detection ([`state`])
//!
//! The pipeline is total over all string inputs: there is no failure mode,
//! only degenerate classifications. Each invocation allocates its own
//! accumulator state, so calls are freely concurrent.

pub mod classify;
pub mod hints;
pub mod message;
pub mod reduce;
pub mod state;
pub mod strip;

pub use hints::{extract_hints, PromptHints};
pub use message::{Message, MessageKind, ParseResult, SessionState};
pub use strip::{is_noise_line, strip_ansi};

/// Run the full pipeline over one raw capture.
#[must_use]
pub fn parse(raw: &str) -> ParseResult {
    let clean = strip::strip_ansi(raw);
    let state = state::detect_state(clean.split('\n'));
    let messages = reduce::reduce_lines(clean.split('\n'));
    ParseResult {
        messages,
        state,
        error: None,
    }
}

/// Cheap polling variant: stripping and state detection only.
#[must_use]
pub fn detect_state_only(raw: &str) -> SessionState {
    let clean = strip::strip_ansi(raw);
    state::detect_state(clean.split('\n'))
}
