use grep_filter::host::protocol::parse_transcript;
use grep_filter::host::{HostCommand, HostError, SessionStep};

// ─── HostCommand command lines ───

#[test]
fn test_filter_add_display() {
    let cmd = HostCommand::FilterAdd {
        name: "grep_filter_irc.libera.#rust".to_string(),
        buffers: "irc.libera.#rust".to_string(),
        tags: "*".to_string(),
        regex: "!error".to_string(),
    };
    assert_eq!(
        cmd.to_string(),
        "/filter add grep_filter_irc.libera.#rust irc.libera.#rust * !error"
    );
}

#[test]
fn test_filter_del_display() {
    let cmd = HostCommand::FilterDel {
        name: "grep_filter_core.weechat".to_string(),
    };
    assert_eq!(cmd.to_string(), "/filter del grep_filter_core.weechat");
}

#[test]
fn test_parse_matches_display() {
    let commands = [
        HostCommand::FilterAdd {
            name: "grep_filter_a,b".to_string(),
            buffers: "a,b".to_string(),
            tags: "*".to_string(),
            regex: "!two words".to_string(),
        },
        HostCommand::FilterDel {
            name: "grep_filter_a,b".to_string(),
        },
    ];
    for cmd in commands {
        let parsed: HostCommand = cmd.to_string().parse().unwrap();
        assert_eq!(parsed, cmd);
    }
}

#[test]
fn test_parse_rejects_other_commands() {
    assert!(matches!(
        "/buffer 3".parse::<HostCommand>(),
        Err(HostError::UnknownCommand(_))
    ));
    assert!(matches!(
        "/filter toggle".parse::<HostCommand>(),
        Err(HostError::UnknownCommand(_))
    ));
}

#[test]
fn test_parse_reports_missing_argument() {
    match "/filter add name buffers *".parse::<HostCommand>() {
        Err(HostError::MissingArgument { argument, .. }) => assert_eq!(argument, "regex"),
        other => panic!("unexpected: {other:?}"),
    }
    match "/filter del".parse::<HostCommand>() {
        Err(HostError::MissingArgument { argument, .. }) => assert_eq!(argument, "name"),
        other => panic!("unexpected: {other:?}"),
    }
}

// ─── HostCommand JSON ───

#[test]
fn test_command_json_is_tagged() {
    let cmd = HostCommand::FilterDel {
        name: "n".to_string(),
    };
    let json = serde_json::to_string(&cmd).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["type"], "filter_del");
    assert_eq!(parsed["name"], "n");
}

// ─── Transcripts ───

#[test]
fn test_transcript_parses_all_step_kinds() {
    let transcript = r##"
# a comment
{"step":"open_buffer","full_name":"irc.libera.#rust","number":2}
{"step":"print","buffer":"irc.libera.#rust","message":"hello","tags":["irc_privmsg"]}
{"step":"print","buffer":"irc.libera.#rust","message":"no tags"}
{"step":"start_search","buffer":"irc.libera.#rust"}
{"step":"input","buffer":"irc.libera.#rust","text":"hel"}
{"step":"stop_search","buffer":"irc.libera.#rust"}
{"step":"close_buffer","full_name":"irc.libera.#rust"}
"##;
    let steps = parse_transcript(transcript).unwrap();
    let kinds: Vec<&str> = steps.iter().map(SessionStep::kind).collect();

    assert_eq!(
        kinds,
        [
            "open_buffer",
            "print",
            "print",
            "start_search",
            "input",
            "stop_search",
            "close_buffer"
        ]
    );
    assert_eq!(
        steps[2],
        SessionStep::Print {
            buffer: "irc.libera.#rust".to_string(),
            message: "no tags".to_string(),
            tags: Vec::new(),
        }
    );
    assert!(steps.iter().all(|s| s.buffer_name() == "irc.libera.#rust"));
}

#[test]
fn test_transcript_error_names_line() {
    let transcript = "{\"step\":\"start_search\",\"buffer\":\"x\"}\n\n{\"step\":\"jump\"}\n";
    match parse_transcript(transcript) {
        Err(HostError::Transcript { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected: {other:?}"),
    }
}
