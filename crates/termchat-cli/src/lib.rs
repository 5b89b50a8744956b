//! `termchat` command-line interface.
//!
//! Three subcommands over one injected [`PaneClient`]:
//!
//! - `chat  --session <name> [--lines N] [--json|--jsonl]` — capture and
//!   parse the transcript.
//! - `state --session <name> [--json]` — cheap idle/working/done poll.
//! - `send  --session <name> <text...>` — type text into the session.
//!
//! Capture failures in `chat`/`state` are not process failures: the
//! payload carries the error and the exit code stays 0, so poll loops
//! keep running. Argument errors and send failures exit 1.

use std::env;
use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use termchat_tmux::{ChatCapture, ChatService, PaneClient, ShellPaneClient, StateCapture};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
    Jsonl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedArgs {
    Chat {
        session: String,
        lines: Option<u32>,
        format: OutputFormat,
    },
    State {
        session: String,
        format: OutputFormat,
    },
    Send {
        session: String,
        text: String,
    },
}

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    session: &'a str,
    captured_at: String,
    #[serde(flatten)]
    capture: &'a ChatCapture,
}

#[derive(Debug, Serialize)]
struct StatePayload<'a> {
    session: &'a str,
    captured_at: String,
    #[serde(flatten)]
    capture: &'a StateCapture,
}

pub fn run_from_env() -> i32 {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    run_with_client(&args, &ShellPaneClient, &mut stdout, &mut stderr)
}

pub fn run_for_test(args: &[&str], client: &dyn PaneClient) -> CommandOutput {
    let owned_args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = run_with_client(&owned_args, client, &mut stdout, &mut stderr);
    CommandOutput {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code,
    }
}

pub fn run_with_client(
    args: &[String],
    client: &dyn PaneClient,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    match execute(args, client, stdout) {
        Ok(()) => 0,
        Err(message) => {
            let _ = writeln!(stderr, "{message}");
            1
        }
    }
}

fn execute(
    args: &[String],
    client: &dyn PaneClient,
    stdout: &mut dyn Write,
) -> Result<(), String> {
    match parse_args(args)? {
        ParsedArgs::Chat {
            session,
            lines,
            format,
        } => {
            let mut service = ChatService::new(client);
            if let Some(lines) = lines {
                service = service.with_chat_lines(lines);
            }
            let capture = service.chat_buffer(&session);
            write_chat(stdout, &session, &capture, format)
        }
        ParsedArgs::State { session, format } => {
            let service = ChatService::new(client);
            let capture = service.session_state(&session);
            write_state(stdout, &session, &capture, format)
        }
        ParsedArgs::Send { session, text } => {
            let service = ChatService::new(client);
            service
                .send_input(&session, &text)
                .map_err(|err| err.to_string())?;
            writeln!(stdout, "Sent to session '{session}'").map_err(|err| err.to_string())
        }
    }
}

fn write_chat(
    stdout: &mut dyn Write,
    session: &str,
    capture: &ChatCapture,
    format: OutputFormat,
) -> Result<(), String> {
    if format != OutputFormat::Human {
        let payload = ChatPayload {
            session,
            captured_at: timestamp(),
            capture,
        };
        return write_json(stdout, &payload, format);
    }

    if let Some(error) = &capture.error {
        writeln!(stdout, "error: {error}").map_err(|err| err.to_string())?;
    }
    for msg in &capture.messages {
        let mut lines = msg.content.lines();
        let first = lines.next().unwrap_or_default();
        writeln!(stdout, "{:<12} {first}", msg.kind.slug()).map_err(|err| err.to_string())?;
        for line in lines {
            writeln!(stdout, "{:<12} {line}", "").map_err(|err| err.to_string())?;
        }
    }
    writeln!(stdout, "state: {}", capture.state).map_err(|err| err.to_string())
}

fn write_state(
    stdout: &mut dyn Write,
    session: &str,
    capture: &StateCapture,
    format: OutputFormat,
) -> Result<(), String> {
    if format != OutputFormat::Human {
        let payload = StatePayload {
            session,
            captured_at: timestamp(),
            capture,
        };
        return write_json(stdout, &payload, format);
    }

    if let Some(error) = &capture.error {
        writeln!(stdout, "error: {error}").map_err(|err| err.to_string())?;
    }
    writeln!(stdout, "{}", capture.state).map_err(|err| err.to_string())
}

fn write_json<T: Serialize>(
    stdout: &mut dyn Write,
    payload: &T,
    format: OutputFormat,
) -> Result<(), String> {
    if format == OutputFormat::Jsonl {
        serde_json::to_writer(&mut *stdout, payload).map_err(|err| err.to_string())?;
    } else {
        serde_json::to_writer_pretty(&mut *stdout, payload).map_err(|err| err.to_string())?;
    }
    writeln!(stdout).map_err(|err| err.to_string())
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_args(args: &[String]) -> Result<ParsedArgs, String> {
    let command = args
        .first()
        .ok_or_else(|| usage("missing command"))?
        .as_str();

    match command {
        "chat" => {
            let mut session = String::new();
            let mut lines = None;
            let mut format = OutputFormat::Human;
            let mut index = 1usize;
            while let Some(token) = args.get(index) {
                match token.as_str() {
                    "--session" => {
                        session = take_value(args, index, "--session")?;
                        index += 2;
                    }
                    "--lines" => {
                        let raw = take_value(args, index, "--lines")?;
                        lines = Some(
                            raw.parse::<u32>()
                                .map_err(|_| format!("error: invalid --lines value: '{raw}'"))?,
                        );
                        index += 2;
                    }
                    "--json" => {
                        format = OutputFormat::Json;
                        index += 1;
                    }
                    "--jsonl" => {
                        format = OutputFormat::Jsonl;
                        index += 1;
                    }
                    unknown => {
                        return Err(format!("error: unknown argument for chat: '{unknown}'"))
                    }
                }
            }
            require_session(&session)?;
            Ok(ParsedArgs::Chat {
                session,
                lines,
                format,
            })
        }
        "state" => {
            let mut session = String::new();
            let mut format = OutputFormat::Human;
            let mut index = 1usize;
            while let Some(token) = args.get(index) {
                match token.as_str() {
                    "--session" => {
                        session = take_value(args, index, "--session")?;
                        index += 2;
                    }
                    "--json" => {
                        format = OutputFormat::Json;
                        index += 1;
                    }
                    "--jsonl" => {
                        format = OutputFormat::Jsonl;
                        index += 1;
                    }
                    unknown => {
                        return Err(format!("error: unknown argument for state: '{unknown}'"))
                    }
                }
            }
            require_session(&session)?;
            Ok(ParsedArgs::State { session, format })
        }
        "send" => {
            let mut session = String::new();
            let mut text_parts: Vec<String> = Vec::new();
            let mut index = 1usize;
            while let Some(token) = args.get(index) {
                match token.as_str() {
                    "--session" => {
                        session = take_value(args, index, "--session")?;
                        index += 2;
                    }
                    _ => {
                        text_parts.push(token.clone());
                        index += 1;
                    }
                }
            }
            require_session(&session)?;
            if text_parts.is_empty() {
                return Err("error: send requires text".to_string());
            }
            Ok(ParsedArgs::Send {
                session,
                text: text_parts.join(" "),
            })
        }
        unknown => Err(usage(&format!("unknown command: '{unknown}'"))),
    }
}

fn require_session(session: &str) -> Result<(), String> {
    if session.trim().is_empty() {
        return Err("error: --session is required".to_string());
    }
    Ok(())
}

fn take_value(args: &[String], index: usize, flag: &str) -> Result<String, String> {
    args.get(index + 1)
        .cloned()
        .ok_or_else(|| format!("error: missing value for {flag}"))
}

fn usage(message: &str) -> String {
    format!(
        "error: {message}\n\nUsage:\n  termchat chat  --session <name> [--lines N] [--json|--jsonl]\n  termchat state --session <name> [--json|--jsonl]\n  termchat send  --session <name> <text...>"
    )
}
