//! End-to-end scenarios for the capture parsing pipeline.

use termchat_core::{detect_state_only, parse, MessageKind, SessionState};

#[test]
fn user_tool_summary_disambiguation() {
    let buffer = "❯ commit and push\n\n● Bash(git add && git commit && git push)\n⎿  [dev abc123] feat: add feature\n\n● Done. Changes committed.";
    let result = parse(buffer);

    assert_eq!(result.messages.len(), 3);
    assert_eq!(result.messages[0].kind, MessageKind::User);
    assert_eq!(result.messages[0].content, "commit and push");
    assert_eq!(result.messages[1].kind, MessageKind::Tool);
    assert_eq!(result.messages[1].tool_name.as_deref(), Some("Bash"));
    assert!(result.messages[1].content.contains("git add"));
    assert_eq!(result.messages[2].kind, MessageKind::Summary);
    assert_eq!(result.messages[2].content, "Done. Changes committed.");
}

#[test]
fn noise_lines_vanish_from_output() {
    let buffer = "▐▛███▜▌ Product v1.0\n❯ show status\nuser@host:~/project$ claude\n● Everything looks healthy.\n✽ Thinking…";
    let result = parse(buffer);

    assert_eq!(result.messages.len(), 2);
    assert_eq!(result.messages[0].kind, MessageKind::User);
    assert_eq!(result.messages[1].kind, MessageKind::Summary);
    for msg in &result.messages {
        assert!(!msg.content.contains("▐▛"));
        assert!(!msg.content.contains("user@host"));
        assert!(!msg.content.contains("Thinking"));
    }
}

#[test]
fn summary_continuation_merges_into_one_message() {
    let buffer = "● Deployment successful!\n⎿  ┌────────┬─────────┐\n⎿  │ Status │ Details │\n\n";
    let result = parse(buffer);

    assert_eq!(result.messages.len(), 1);
    let summary = &result.messages[0];
    assert_eq!(summary.kind, MessageKind::Summary);
    assert!(summary.content.contains("Deployment successful!"));
    assert!(summary.content.contains("┌"));
    assert!(summary.content.contains("Status"));
}

#[test]
fn messages_preserve_line_order() {
    let buffer = "● Read(file1.py)\n⎿  content of file1\n\n● Read(file2.py)\n⎿  content of file2\n\n● I've reviewed both files.";
    let result = parse(buffer);

    let kinds: Vec<MessageKind> = result.messages.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        [MessageKind::Tool, MessageKind::Tool, MessageKind::Summary]
    );
    assert!(result.messages[0].content.contains("file1"));
    assert!(result.messages[1].content.contains("file2"));
}

#[test]
fn summary_between_tools() {
    let buffer = "● Bash(npm install)\n⎿  added 100 packages\n\n● Dependencies installed successfully.\n\n● Bash(npm test)\n⎿  All tests passed";
    let result = parse(buffer);

    let kinds: Vec<MessageKind> = result.messages.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        [MessageKind::Tool, MessageKind::Summary, MessageKind::Tool]
    );
}

#[test]
fn every_content_line_is_accounted_for() {
    let buffer = "❯ do the thing\n● Bash(make)\n⎿  compiling\n● Build finished.\nAll targets are up to date.";
    let result = parse(buffer);

    let all_content: String = result
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    for fragment in [
        "do the thing",
        "Bash(make)",
        "compiling",
        "Build finished.",
        "All targets are up to date.",
    ] {
        assert!(all_content.contains(fragment), "missing {fragment:?}");
    }
}

#[test]
fn ansi_heavy_capture_parses_like_clean_one() {
    let styled = "\x1b[1m❯\x1b[0m commit\n\x1b[32m● Bash(git commit)\x1b[0m\n\x1b[2m⎿  [main 1a2b3c] done\x1b[0m";
    let clean = "❯ commit\n● Bash(git commit)\n⎿  [main 1a2b3c] done";
    assert_eq!(parse(styled).messages, parse(clean).messages);
}

#[test]
fn state_scenarios() {
    assert_eq!(detect_state_only("output\n❯"), SessionState::Idle);
    assert_eq!(detect_state_only("● Bash(ls)\n✽ Thinking…"), SessionState::Working);
    assert_eq!(
        detect_state_only("● Bash(git push)\n⎿  pushed\nAll done here."),
        SessionState::Done
    );
    assert_eq!(detect_state_only(""), SessionState::Idle);
}

#[test]
fn whitespace_only_capture_is_empty_and_idle() {
    let result = parse("   \n\n \t ");
    assert!(result.messages.is_empty());
    assert_eq!(result.state, SessionState::Idle);
    assert_eq!(result.error, None);
}

#[test]
fn parse_result_serializes_with_slugs() {
    let result = parse("● Bash(ls)\n⎿  file.txt");
    let json = match serde_json::to_string(&result) {
        Ok(json) => json,
        Err(err) => panic!("serialize: {err}"),
    };
    assert!(json.contains("\"kind\":\"tool\""));
    assert!(json.contains("\"tool_name\":\"Bash\""));
    assert!(json.contains("\"state\":\"working\""));
}
