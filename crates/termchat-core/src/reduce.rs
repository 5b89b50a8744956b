//! Stateful reduction of classified lines into sealed messages.
//!
//! A fold over the cleaned lines with one explicit open-message builder.
//! Lines either open a new message (sealing the previous one), continue
//! the open message, or emit a standalone sealed message. The builder is
//! sealed at the first boundary line and at end of input; empty
//! accumulations are discarded, never emitted.

use crate::classify::{classify_line, tool_invocation, LineKind};
use crate::message::{Message, MessageKind};
use crate::strip::is_noise_line;

/// In-progress message accumulating continuation lines.
#[derive(Debug, Clone)]
struct OpenMessage {
    kind: MessageKind,
    tool_name: Option<String>,
    collapsed: bool,
    lines: Vec<String>,
}

impl OpenMessage {
    fn new(kind: MessageKind, first: &str) -> Self {
        let collapsed = matches!(kind, MessageKind::Tool | MessageKind::ToolOutput);
        Self {
            kind,
            tool_name: None,
            collapsed,
            lines: vec![first.to_string()],
        }
    }

    fn tool(name: &str, first: &str) -> Self {
        Self {
            tool_name: Some(name.to_string()),
            ..Self::new(MessageKind::Tool, first)
        }
    }

    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Finalize the accumulated content. Empty accumulations vanish.
    fn seal(self) -> Option<Message> {
        let content = self.lines.join("\n").trim().to_string();
        if content.is_empty() {
            return None;
        }
        Some(Message {
            kind: self.kind,
            content,
            tool_name: self.tool_name,
            collapsed: self.collapsed,
        })
    }
}

fn seal_into(open: &mut Option<OpenMessage>, out: &mut Vec<Message>) {
    if let Some(msg) = open.take().and_then(OpenMessage::seal) {
        out.push(msg);
    }
}

/// Reduce cleaned lines into an ordered sequence of sealed messages.
///
/// Noise lines are skipped as if absent and never interrupt an open
/// message. Blank lines are dropped unless a summary is open, where they
/// survive as paragraph breaks.
#[must_use]
pub fn reduce_lines<'a, I>(lines: I) -> Vec<Message>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut messages = Vec::new();
    let mut open: Option<OpenMessage> = None;

    for line in lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() && is_noise_line(trimmed) {
            continue;
        }

        match classify_line(line) {
            LineKind::Blank => {
                if let Some(msg) = open.as_mut() {
                    if msg.kind == MessageKind::Summary {
                        msg.push("");
                    }
                }
            }
            LineKind::Prompt { input } => {
                seal_into(&mut open, &mut messages);
                if !input.is_empty() {
                    messages.push(Message::new(MessageKind::User, input));
                }
            }
            LineKind::Bullet { text } => {
                seal_into(&mut open, &mut messages);
                open = Some(match tool_invocation(text) {
                    Some(name) => OpenMessage::tool(name, text),
                    None => OpenMessage::new(MessageKind::Summary, text),
                });
            }
            LineKind::Output { text } => match open.as_mut() {
                // Both tools and summaries absorb their continuation lines.
                Some(msg)
                    if msg.kind == MessageKind::Tool || msg.kind == MessageKind::Summary =>
                {
                    msg.push(text);
                }
                _ => {
                    seal_into(&mut open, &mut messages);
                    open = Some(OpenMessage::new(MessageKind::ToolOutput, text));
                }
            },
            LineKind::Task { text } => {
                seal_into(&mut open, &mut messages);
                if !text.is_empty() {
                    let mut msg = Message::new(MessageKind::Task, text);
                    msg.collapsed = true;
                    messages.push(msg);
                }
            }
            LineKind::Error { text } => {
                seal_into(&mut open, &mut messages);
                if !text.is_empty() {
                    messages.push(Message::new(MessageKind::Error, text));
                }
            }
            LineKind::Plain { text } => match open.as_mut() {
                Some(msg) if msg.kind == MessageKind::Summary => msg.push(text),
                _ => {
                    seal_into(&mut open, &mut messages);
                    open = Some(OpenMessage::new(MessageKind::Summary, text));
                }
            },
        }
    }

    seal_into(&mut open, &mut messages);
    messages
}
