//! Parsed message and session-state types.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Message kinds
// ---------------------------------------------------------------------------

/// The kind of a parsed transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Text typed by the user at the prompt.
    User,

    /// A structured tool invocation (`Bash(git push)`, `Read(file.rs)`, ...).
    Tool,

    /// Tool output lines that arrived without an open tool invocation.
    ToolOutput,

    /// Free-form natural-language status text from the assistant.
    Summary,

    /// A completed task marker line.
    Task,

    /// An error line.
    Error,

    /// Reserved for host-injected notices; never produced by the parser.
    System,
}

impl MessageKind {
    /// Stable slug for serialization and snapshot tests.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Tool => "tool",
            Self::ToolOutput => "tool_output",
            Self::Summary => "summary",
            Self::Task => "task",
            Self::Error => "error",
            Self::System => "system",
        }
    }

    /// Parse from slug.
    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "tool" => Some(Self::Tool),
            "tool_output" => Some(Self::ToolOutput),
            "summary" => Some(Self::Summary),
            "task" => Some(Self::Task),
            "error" => Some(Self::Error),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Coarse state of the captured session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Prompt visible, waiting for input.
    Idle,
    /// A tool or thought is in flight.
    Working,
    /// Response complete, no prompt yet.
    Done,
}

impl SessionState {
    /// Stable slug for serialization.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Done => "done",
        }
    }

    /// Parse from slug.
    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "working" => Some(Self::Working),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// One parsed transcript message.
///
/// `content` is newline-joined from the originating line plus continuation
/// lines, trimmed at both ends. Sealed messages always have non-empty
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub content: String,
    /// Tool identifier for `Tool` messages (`Bash`, `Read`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// UI hint: verbose messages render folded by default.
    pub collapsed: bool,
}

impl Message {
    #[must_use]
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            tool_name: None,
            collapsed: false,
        }
    }
}

/// Result of a full parse pass over one capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub messages: Vec<Message>,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_slug_round_trip() {
        for kind in [
            MessageKind::User,
            MessageKind::Tool,
            MessageKind::ToolOutput,
            MessageKind::Summary,
            MessageKind::Task,
            MessageKind::Error,
            MessageKind::System,
        ] {
            assert_eq!(MessageKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(MessageKind::from_slug("assistant"), None);
    }

    #[test]
    fn state_slug_round_trip() {
        for state in [
            SessionState::Idle,
            SessionState::Working,
            SessionState::Done,
        ] {
            assert_eq!(SessionState::from_slug(state.slug()), Some(state));
        }
        assert_eq!(SessionState::from_slug("busy"), None);
    }

    #[test]
    fn message_serializes_without_absent_tool_name() {
        let msg = Message::new(MessageKind::Summary, "Done.");
        let json = match serde_json::to_string(&msg) {
            Ok(json) => json,
            Err(err) => panic!("serialize: {err}"),
        };
        assert!(!json.contains("tool_name"));
        assert!(json.contains("\"kind\":\"summary\""));
    }
}
