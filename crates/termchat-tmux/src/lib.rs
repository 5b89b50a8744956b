//! Buffer source and input sink for chat parsing: the tmux side.
//!
//! [`PaneClient`] is the seam between the pure pipeline and the terminal
//! multiplexer; [`ChatService`] combines a client with the parser and
//! owns the capture-failure short-circuit.

pub mod client;
pub mod service;

pub use client::{PaneClient, ShellPaneClient, StaticPaneClient};
pub use service::{
    ChatCapture, ChatService, ServiceError, StateCapture, DEFAULT_CHAT_LINES, DEFAULT_STATE_LINES,
};
