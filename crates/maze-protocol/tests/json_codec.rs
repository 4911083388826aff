// crates/maze-protocol/tests/json_codec.rs
use std::time::Duration;

use maze_core::{Command, DoneSummary, OutputEvent, Point};
use maze_protocol::{
    decode_command, decode_event, encode_command, encode_event, parse_command_line, CommandError,
    ProtocolError, ValidationError, ValidationPolicy, WireCommand, WirePoint, WireSolve,
};
use serde_json::{json, Value};

const SOLVE: &str = r#"{"type":"solve","maze":[[false,false],[true,false]],"start":{"row":0,"col":0},"goal":{"row":1,"col":1},"animationSpeed":40}"#;

#[test]
fn parses_solve_with_legacy_field_names() {
    let Command::Solve(req) = parse_command_line(SOLVE, ValidationPolicy::LENIENT).unwrap() else {
        panic!("expected solve");
    };
    assert_eq!(req.grid.rows(), 2);
    assert_eq!(req.grid.cols(), 2);
    assert!(req.grid.is_wall(Point::new(1, 0)));
    assert_eq!(req.start, Point::new(0, 0));
    assert_eq!(req.goal, Point::new(1, 1));
    assert_eq!(req.pace, Some(Duration::from_millis(40)));
}

#[test]
fn parses_solve_with_current_field_names() {
    let line = r#"{"type":"solve","grid":[[false]],"start":{"row":0,"col":0},"goal":{"row":0,"col":0},"paceMs":5}"#;
    let Command::Solve(req) = parse_command_line(line, ValidationPolicy::LENIENT).unwrap() else {
        panic!("expected solve");
    };
    assert_eq!(req.pace, Some(Duration::from_millis(5)));
}

#[test]
fn pace_is_optional() {
    let line = r#"{"type":"solve","grid":[[false]],"start":{"row":0,"col":0},"goal":{"row":0,"col":0}}"#;
    let Command::Solve(req) = parse_command_line(line, ValidationPolicy::LENIENT).unwrap() else {
        panic!("expected solve");
    };
    assert_eq!(req.pace, None);
}

#[test]
fn any_numeric_pace_is_accepted() {
    let pace_of = |speed: &str| {
        let line = format!(
            r#"{{"type":"solve","grid":[[false]],"start":{{"row":0,"col":0}},"goal":{{"row":0,"col":0}},"animationSpeed":{speed}}}"#
        );
        match parse_command_line(&line, ValidationPolicy::LENIENT).unwrap() {
            Command::Solve(req) => req.pace,
            other => panic!("expected solve, got {other:?}"),
        }
    };

    assert_eq!(pace_of("12.6"), Some(Duration::from_millis(13)));
    assert_eq!(pace_of("0.2"), Some(Duration::from_millis(1)));
    assert_eq!(pace_of("-50"), Some(Duration::from_millis(1)));
    assert_eq!(pace_of("0"), None);
    assert_eq!(pace_of("0.0"), None);
    assert_eq!(pace_of("null"), None);
}

#[test]
fn parses_control_commands() {
    let policy = ValidationPolicy::LENIENT;
    assert_eq!(parse_command_line(r#"{"type":"pause"}"#, policy).unwrap(), Command::Pause);
    assert_eq!(parse_command_line(r#"{"type":"resume"}"#, policy).unwrap(), Command::Resume);
    assert_eq!(
        parse_command_line(r#" {"type":"stop","extra":1} "#, policy).unwrap(),
        Command::Stop
    );
}

#[test]
fn malformed_lines_are_protocol_errors() {
    for line in [
        "not json",
        r#"{"type":"jump"}"#,
        r#"{"grid":[[false]]}"#,
        r#"{"type":"solve","grid":[[false]],"start":{"row":0},"goal":{"row":0,"col":0}}"#,
        r#"{"type":"solve","grid":[[0]],"start":{"row":0,"col":0},"goal":{"row":0,"col":0}}"#,
        r#"{"type":"solve","grid":[[false]],"start":{"row":"0","col":0},"goal":{"row":0,"col":0}}"#,
    ] {
        let err = parse_command_line(line, ValidationPolicy::LENIENT).unwrap_err();
        assert!(
            matches!(err, CommandError::Protocol(ProtocolError::Json(_))),
            "{line}: {err:?}"
        );
    }

    assert!(matches!(decode_command("   "), Err(ProtocolError::Empty)));
}

#[test]
fn invalid_grids_and_points_are_validation_errors() {
    let jagged = r#"{"type":"solve","grid":[[false,false],[false]],"start":{"row":0,"col":0},"goal":{"row":0,"col":0}}"#;
    assert!(matches!(
        parse_command_line(jagged, ValidationPolicy::LENIENT),
        Err(CommandError::Validation(ValidationError::InvalidGrid(_)))
    ));

    let empty = r#"{"type":"solve","grid":[],"start":{"row":0,"col":0},"goal":{"row":0,"col":0}}"#;
    assert!(matches!(
        parse_command_line(empty, ValidationPolicy::LENIENT),
        Err(CommandError::Validation(ValidationError::InvalidGrid(_)))
    ));

    let outside = r#"{"type":"solve","grid":[[false]],"start":{"row":0,"col":0},"goal":{"row":3,"col":0}}"#;
    assert!(matches!(
        parse_command_line(outside, ValidationPolicy::LENIENT),
        Err(CommandError::Validation(ValidationError::OutOfBounds))
    ));
}

#[test]
fn wall_endpoints_depend_on_policy() {
    let line = r#"{"type":"solve","grid":[[true,false]],"start":{"row":0,"col":0},"goal":{"row":0,"col":1}}"#;
    assert!(parse_command_line(line, ValidationPolicy::LENIENT).is_ok());
    assert!(matches!(
        parse_command_line(line, ValidationPolicy::STRICT),
        Err(CommandError::Validation(ValidationError::OnWall))
    ));
}

#[test]
fn visit_event_shape() {
    let line = encode_event(&OutputEvent::visit(Point::new(2, 3))).unwrap();
    let value: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value, json!({"type": "visit", "node": {"row": 2, "col": 3}}));
}

#[test]
fn done_event_shape() {
    let summary = DoneSummary {
        path: vec![Point::new(0, 0), Point::new(0, 1)],
        path_length: 1,
        visited_count: 2,
        visited_nodes: vec!["0,0".to_string(), "0,1".to_string()],
        error: None,
    };
    let line = encode_event(&OutputEvent::Done(summary)).unwrap();
    let value: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "done",
            "path": [{"row": 0, "col": 0}, {"row": 0, "col": 1}],
            "pathLength": 1,
            "visitedCount": 2,
            "visitedNodes": ["0,0", "0,1"]
        })
    );
}

#[test]
fn error_done_event_carries_error_and_zero_counts() {
    let line = encode_event(&OutputEvent::error("Failed to process request")).unwrap();
    let value: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "done",
            "path": [],
            "pathLength": 0,
            "visitedCount": 0,
            "visitedNodes": [],
            "error": "Failed to process request"
        })
    );
}

#[test]
fn events_decode_back() {
    let event = OutputEvent::Done(DoneSummary::failed("boom"));
    let line = encode_event(&event).unwrap();
    assert_eq!(decode_event(&line).unwrap(), event);
}

#[test]
fn encoded_commands_are_accepted_by_the_parser() {
    let solve = WireCommand::Solve(WireSolve {
        grid: vec![vec![false, false, false]],
        start: WirePoint { row: 0, col: 0 },
        goal: WirePoint { row: 0, col: 2 },
        pace_ms: None,
    });
    let line = encode_command(&solve).unwrap();
    assert!(!line.contains("paceMs"));
    assert!(matches!(
        parse_command_line(&line, ValidationPolicy::STRICT).unwrap(),
        Command::Solve(_)
    ));

    assert_eq!(encode_command(&WireCommand::Pause).unwrap(), r#"{"type":"pause"}"#);
}
