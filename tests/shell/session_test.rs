/*!
 * Session Tests
 * Scripts in, transcripts out
 */

use pretty_assertions::assert_eq;
use prm_kernel::{Kernel, OutputFormat, Session, SessionError, ShellError};

#[test]
fn test_reference_script() {
    let script = "\
init
cr x 1
cr p 1
cr q 1
cr r 1
to
req R2 1
to
req R3 3
to
req R4 3
to
to
req R3 1
req R4 2
req R2 2
to
de q
to
to
";
    let mut session = Session::new().check_invariants(true);
    let lines = session.run_script(script).lines();
    assert_eq!(
        lines,
        vec![
            "init", "x", "x", "x", "x", "p", "p", "q", "q", "r", "r", "x", "p", "q", "r", "x",
            "x", "x", "p", "x",
        ]
    );
    assert_eq!(session.transcript().error_count(), 0);
}

#[test]
fn test_errors_do_not_stop_the_script() {
    let mut session = Session::new();
    let lines = session
        .run_script("cr a 3\nde nobody\nrel R1 1\nfrob\ncr\ncr a two\ncr a 1\n")
        .lines();
    assert_eq!(
        lines,
        vec![
            "error: priority must be 1 or 2, got 3",
            "error: process does not exist: nobody",
            "error: not holding resource: R1",
            "error: invalid operation: frob",
            "error: cr: missing argument <name>",
            "error: invalid argument: two",
            "a",
        ]
    );
    assert!(!session.is_finished());
}

#[test]
fn test_quit_ends_the_session() {
    let mut session = Session::new();
    let transcript = session.run_script("cr a 1\nquit\ncr b 2\n");
    assert_eq!(transcript.lines(), vec!["a"]);
    assert!(session.is_finished());
    assert_eq!(session.kernel().find("b"), None);
}

#[test]
fn test_feed_line_records_entry() {
    let mut session = Session::new();
    assert!(session.feed_line(1, "   ").is_none());

    let entry = session.feed_line(2, "CR a 2").unwrap();
    assert_eq!(entry.line, 2);
    assert_eq!(entry.running.as_deref(), Some("a"));

    let entry = session.feed_line(3, "de b").unwrap();
    assert!(entry.is_error());
    assert!(matches!(entry.error, Some(SessionError::Kernel(_))));

    let entry = session.feed_line(4, "launch").unwrap();
    assert_eq!(
        entry.error,
        Some(SessionError::Shell(ShellError::InvalidOperation("launch".into())))
    );
}

#[test]
fn test_session_over_existing_kernel() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();

    let mut session = Session::with_kernel(kernel);
    session.run_script("req R4 4\nto\n");
    assert_eq!(session.kernel().running_name(), "a");
    assert_eq!(session.kernel().resource_info("R4").unwrap().available, 0);
}

#[test]
fn test_json_transcript() {
    let mut session = Session::new();
    session.run_script("cr a 1\nde zz\n");
    let json = session.transcript().render(OutputFormat::Json).unwrap();
    let rows: Vec<serde_json::Value> = json
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["running"], "a");
    assert_eq!(rows[0]["line"], 1);
    assert_eq!(
        rows[1]["error"]["kernel"]["error_type"],
        "process_not_found"
    );
    assert_eq!(rows[1]["error"]["kernel"]["details"], "zz");
}
