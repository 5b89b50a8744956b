//! Chat service: capture a pane, parse it, report state.
//!
//! Thin wrapper over a [`PaneClient`] and the pure pipeline. Capture
//! failures never surface as hard errors from the polling entry points;
//! they short-circuit into an empty payload with the reason in `error`,
//! so a dashboard poll loop degrades instead of crashing.

use serde::Serialize;
use thiserror::Error;

use termchat_core::{extract_hints, parse, Message, SessionState};
use termchat_core::classify::PROMPT_MARKER;
use termchat_core::state::detect_state;
use termchat_core::strip_ansi;

use crate::client::PaneClient;

/// Scrollback rows captured for a full chat parse.
pub const DEFAULT_CHAT_LINES: u32 = 500;
/// Scrollback rows captured for the cheap state poll.
pub const DEFAULT_STATE_LINES: u32 = 20;

/// Errors from operations that do fail hard (input delivery).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("session name is required")]
    MissingSession,
    #[error("send input to session {session:?}: {reason}")]
    SendFailed { session: String, reason: String },
}

/// One parsed chat snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCapture {
    pub messages: Vec<Message>,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the prompt glyph is visible anywhere in the buffer.
    pub raw_has_prompt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Result of the cheap state poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCapture {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Service combining a pane client with the parsing pipeline.
pub struct ChatService<'a> {
    client: &'a dyn PaneClient,
    chat_lines: u32,
    state_lines: u32,
}

impl<'a> ChatService<'a> {
    #[must_use]
    pub fn new(client: &'a dyn PaneClient) -> Self {
        Self {
            client,
            chat_lines: DEFAULT_CHAT_LINES,
            state_lines: DEFAULT_STATE_LINES,
        }
    }

    #[must_use]
    pub fn with_chat_lines(mut self, lines: u32) -> Self {
        self.chat_lines = lines;
        self
    }

    #[must_use]
    pub fn with_state_lines(mut self, lines: u32) -> Self {
        self.state_lines = lines;
        self
    }

    /// Capture and parse the session's visible transcript.
    ///
    /// Captures with escape sequences so mode and autocomplete hints can
    /// be recovered before stripping.
    #[must_use]
    pub fn chat_buffer(&self, session: &str) -> ChatCapture {
        let raw = match self.client.capture(session, self.chat_lines, true) {
            Ok(raw) => raw,
            Err(reason) => {
                return ChatCapture {
                    messages: Vec::new(),
                    state: SessionState::Idle,
                    error: Some(capture_error(session, &reason)),
                    raw_has_prompt: false,
                    mode: None,
                    suggestion: None,
                }
            }
        };

        let hints = extract_hints(&raw);
        let clean = strip_ansi(&raw);
        let result = parse(&clean);

        ChatCapture {
            messages: result.messages,
            state: result.state,
            error: None,
            raw_has_prompt: clean.contains(PROMPT_MARKER),
            mode: hints.mode,
            suggestion: hints.suggestion,
        }
    }

    /// Lightweight state check over a small capture.
    #[must_use]
    pub fn session_state(&self, session: &str) -> StateCapture {
        let raw = match self.client.capture(session, self.state_lines, false) {
            Ok(raw) => raw,
            Err(reason) => {
                return StateCapture {
                    state: SessionState::Idle,
                    error: Some(capture_error(session, &reason)),
                }
            }
        };

        let clean = strip_ansi(&raw);
        StateCapture {
            state: detect_state(clean.split('\n')),
            error: None,
        }
    }

    /// Deliver text to the session as typed input.
    pub fn send_input(&self, session: &str, text: &str) -> Result<(), ServiceError> {
        if session.trim().is_empty() {
            return Err(ServiceError::MissingSession);
        }
        self.client
            .send_text(session, text)
            .map_err(|reason| ServiceError::SendFailed {
                session: session.to_string(),
                reason,
            })
    }
}

fn capture_error(session: &str, reason: &str) -> String {
    format!("failed to capture buffer from session {session}: {reason}")
}
