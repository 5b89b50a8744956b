//! Tmux client abstraction for capturing pane content and sending input.

use std::process::Command;
use std::sync::Mutex;

/// Trait for reading from and typing into a tmux pane.
///
/// Abstracted for testability — the default implementation shells out to
/// tmux with a per-call subprocess, so each capture is a point-in-time
/// snapshot.
pub trait PaneClient: Send + Sync {
    /// Capture the last `lines` rows of the pane's scrollback.
    /// If `include_escapes` is true, keep ANSI sequences (`-e` flag).
    fn capture(&self, session: &str, lines: u32, include_escapes: bool) -> Result<String, String>;

    /// Deliver `text` as if typed into the session, followed by Enter.
    fn send_text(&self, session: &str, text: &str) -> Result<(), String>;

    /// Check if a tmux session exists.
    fn has_session(&self, session: &str) -> Result<bool, String>;
}

/// Shell-based client that execs `tmux capture-pane` / `tmux send-keys`.
pub struct ShellPaneClient;

impl PaneClient for ShellPaneClient {
    fn capture(&self, session: &str, lines: u32, include_escapes: bool) -> Result<String, String> {
        if session.trim().is_empty() {
            return Err("session is required".to_string());
        }

        let escaped_session = escape_arg(session);
        let escape_flag = if include_escapes { " -e" } else { "" };
        let cmd_str =
            format!("tmux capture-pane -t {escaped_session} -p{escape_flag} -S -{lines}");
        exec_shell_output(&cmd_str)
    }

    fn send_text(&self, session: &str, text: &str) -> Result<(), String> {
        if session.trim().is_empty() {
            return Err("session is required".to_string());
        }

        let escaped_session = escape_arg(session);
        let escaped_text = escape_arg(text);

        // Text and Enter go in separate send-keys calls; combining them in
        // one command is unreliable.
        exec_shell(&format!(
            "tmux send-keys -t {escaped_session} -l {escaped_text}"
        ))?;
        exec_shell(&format!("tmux send-keys -t {escaped_session} Enter"))
    }

    fn has_session(&self, session: &str) -> Result<bool, String> {
        if session.trim().is_empty() {
            return Err("session is required".to_string());
        }
        let cmd_str = format!("tmux has-session -t {}", escape_arg(session));
        let status = Command::new("sh")
            .args(["-c", &cmd_str])
            .status()
            .map_err(|e| format!("failed to execute tmux command: {e}"))?;
        Ok(status.success())
    }
}

/// In-memory client serving a fixed buffer; records sent input.
///
/// The capture result is shared across calls, so failure paths are as easy
/// to stage as success paths.
#[derive(Debug)]
pub struct StaticPaneClient {
    buffer: Result<String, String>,
    sessions: Vec<String>,
    pub sent: Mutex<Vec<(String, String)>>,
    pub send_error: Option<String>,
}

impl StaticPaneClient {
    #[must_use]
    pub fn with_buffer(buffer: &str) -> Self {
        Self {
            buffer: Ok(buffer.to_string()),
            sessions: Vec::new(),
            sent: Mutex::new(Vec::new()),
            send_error: None,
        }
    }

    #[must_use]
    pub fn with_capture_error(reason: &str) -> Self {
        Self {
            buffer: Err(reason.to_string()),
            sessions: Vec::new(),
            sent: Mutex::new(Vec::new()),
            send_error: None,
        }
    }

    #[must_use]
    pub fn with_sessions(mut self, sessions: &[&str]) -> Self {
        self.sessions = sessions.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_send_error(mut self, reason: &str) -> Self {
        self.send_error = Some(reason.to_string());
        self
    }
}

impl PaneClient for StaticPaneClient {
    fn capture(&self, _session: &str, _lines: u32, _include_escapes: bool) -> Result<String, String> {
        self.buffer.clone()
    }

    fn send_text(&self, session: &str, text: &str) -> Result<(), String> {
        if let Some(reason) = &self.send_error {
            return Err(reason.clone());
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((session.to_string(), text.to_string()));
        }
        Ok(())
    }

    fn has_session(&self, session: &str) -> Result<bool, String> {
        Ok(self.sessions.iter().any(|s| s == session))
    }
}

/// Shell-escape an argument using single quotes.
fn escape_arg(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', "'\\''"))
}

fn exec_shell(cmd: &str) -> Result<(), String> {
    let status = Command::new("sh")
        .args(["-c", cmd])
        .status()
        .map_err(|e| format!("failed to execute tmux command: {e}"))?;

    if !status.success() {
        return Err(format!("tmux command failed with exit code: {status}"));
    }
    Ok(())
}

fn exec_shell_output(cmd: &str) -> Result<String, String> {
    let output = Command::new("sh")
        .args(["-c", cmd])
        .output()
        .map_err(|e| format!("failed to execute tmux command: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "tmux command failed with exit code: {}",
            output.status
        ));
    }

    String::from_utf8(output.stdout).map_err(|e| format!("tmux output was not valid UTF-8: {e}"))
}
