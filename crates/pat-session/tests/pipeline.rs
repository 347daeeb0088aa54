//! Transcript-level tests for the pipeline runner.

use pat_session::{ConsoleEntry, EntryStyle, Session, SessionConfig};

/// Run one script with canned prompt answers; returns the transcript.
fn run(session: &mut Session, source: &str, answers: &[&str]) -> Vec<ConsoleEntry> {
    let mut answers = answers.iter();
    let mut input = |_name: &str| answers.next().map(|s| s.to_string()).unwrap_or_default();
    session.run(source, &mut input);
    session.transcript().to_vec()
}

fn styles(transcript: &[ConsoleEntry]) -> Vec<EntryStyle> {
    transcript.iter().map(|e| e.style).collect()
}

fn count(transcript: &[ConsoleEntry], style: EntryStyle) -> usize {
    transcript.iter().filter(|e| e.style == style).count()
}

// ============================================================================
// Successful runs
// ============================================================================

#[test]
fn successful_run_transcript_shape() {
    let mut session = Session::new();
    let transcript = run(&mut session, "plot \"Hello \" ~ \"World\":", &[]);

    // In order: info marker, non-empty TAC block, separator, plain output,
    // success marker. No error entry anywhere.
    assert_eq!(transcript[0].text, "[Compiling...]");
    assert_eq!(transcript[0].style, EntryStyle::Info);

    let tac_entries = count(&transcript, EntryStyle::Tac);
    assert!(tac_entries > 1, "expected a non-empty TAC block");

    let separator_at = transcript
        .iter()
        .position(|e| e.style == EntryStyle::Info && e.text.starts_with('-'))
        .expect("separator entry");
    assert!(separator_at > 1);

    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .expect("plain output entry");
    assert_eq!(plain.text, "Hello World\n");

    let last = transcript.last().unwrap();
    assert_eq!(last.text, "[Finished]");
    assert_eq!(last.style, EntryStyle::Success);

    assert_eq!(count(&transcript, EntryStyle::Error), 0);
}

#[test]
fn tac_block_sits_between_marker_and_separator() {
    let mut session = Session::new();
    let transcript = run(&mut session, "plot 1:", &[]);
    let styles = styles(&transcript);
    assert_eq!(
        styles,
        vec![
            EntryStyle::Info,    // [Compiling...]
            EntryStyle::Tac,     // [Intermediate Code]
            EntryStyle::Tac,     // param 1
            EntryStyle::Tac,     // call plot, 1
            EntryStyle::Info,    // separator
            EntryStyle::Plain,   // 1
            EntryStyle::Success, // [Finished]
        ]
    );
}

#[test]
fn multi_line_output_is_one_plain_entry_with_line_breaks() {
    let mut session = Session::new();
    let transcript = run(&mut session, "loop i in 1..4 { plot i: }", &[]);
    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .expect("plain output entry");
    assert_eq!(plain.text, "1\n2\n3\n");
}

#[test]
fn script_with_no_output_still_finishes() {
    let mut session = Session::new();
    let transcript = run(&mut session, "5 -> x:", &[]);
    assert_eq!(count(&transcript, EntryStyle::Plain), 0);
    assert_eq!(transcript.last().unwrap().text, "[Finished]");
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn syntax_error_yields_exactly_one_error_entry() {
    let mut session = Session::new();
    let transcript = run(&mut session, "loop i in 1..5 { plot i:", &[]);
    assert_eq!(count(&transcript, EntryStyle::Error), 1);
    assert_eq!(count(&transcript, EntryStyle::Success), 0);
    assert_eq!(count(&transcript, EntryStyle::Tac), 0);

    let error = transcript.last().unwrap();
    assert!(error.text.starts_with("Error: "), "got {:?}", error.text);
}

#[test]
fn runtime_error_discards_partial_output() {
    let mut session = Session::new();
    // The first plot writes into the capture before the failure; the
    // captured text must not surface in the transcript.
    let transcript = run(&mut session, "plot \"early\":\nplot ghost:", &[]);
    assert_eq!(count(&transcript, EntryStyle::Plain), 0);
    assert_eq!(count(&transcript, EntryStyle::Error), 1);
    assert!(transcript.last().unwrap().text.contains("ghost"));
    // The TAC block was already appended and stays.
    assert!(count(&transcript, EntryStyle::Tac) > 1);
}

#[test]
fn session_recovers_after_failed_run() {
    let mut session = Session::new();
    run(&mut session, "plot (:", &[]);

    // A later valid run on the same session still captures output.
    let transcript = run(&mut session, "plot \"back\":", &[]);
    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .expect("output captured after a failed run");
    assert_eq!(plain.text, "back\n");
    assert_eq!(transcript.last().unwrap().text, "[Finished]");
}

#[test]
fn generation_failure_skips_tac_block() {
    let mut session = Session::with_config(SessionConfig {
        max_tac_instructions: 1,
        ..SessionConfig::default()
    });
    let transcript = run(&mut session, "plot 1 + 2:", &[]);
    assert_eq!(count(&transcript, EntryStyle::Tac), 0);
    assert_eq!(count(&transcript, EntryStyle::Error), 1);
}

#[test]
fn optimization_failure_is_reported() {
    let mut session = Session::new();
    let source = format!("plot {} + 1:", i64::MAX);
    let transcript = run(&mut session, &source, &[]);
    let error = transcript.last().unwrap();
    assert_eq!(error.style, EntryStyle::Error);
    assert!(error.text.contains("overflow"));
}

#[test]
fn step_limit_is_a_runtime_error() {
    let mut session = Session::with_config(SessionConfig {
        max_steps: 10,
        ..SessionConfig::default()
    });
    let transcript = run(&mut session, "loop i in 0..1000 { plot i: }", &[]);
    assert_eq!(count(&transcript, EntryStyle::Error), 1);
    assert!(transcript.last().unwrap().text.contains("steps"));
}

// ============================================================================
// Run isolation and invariants
// ============================================================================

#[test]
fn transcript_is_cleared_between_runs() {
    let mut session = Session::new();
    run(&mut session, "plot \"one\":", &[]);
    let transcript = run(&mut session, "plot \"two\":", &[]);

    assert!(transcript.iter().all(|e| !e.text.contains("one")));
    assert!(
        transcript
            .iter()
            .any(|e| e.style == EntryStyle::Plain && e.text.contains("two"))
    );
    // Still exactly one Compiling marker and one terminal marker.
    assert_eq!(count(&transcript, EntryStyle::Info), 2); // marker + separator
    assert_eq!(count(&transcript, EntryStyle::Success), 1);
}

#[test]
fn every_run_has_exactly_one_terminal_marker() {
    let mut session = Session::new();
    for source in ["plot 1:", "plot (:", "plot ghost:"] {
        let transcript = run(&mut session, source, &[]);
        let compiling = transcript
            .iter()
            .filter(|e| e.text == "[Compiling...]")
            .count();
        assert_eq!(compiling, 1);
        let terminals = count(&transcript, EntryStyle::Success) + count(&transcript, EntryStyle::Error);
        assert_eq!(terminals, 1, "source {:?}", source);
    }
}

// ============================================================================
// Input binding through the injected provider
// ============================================================================

#[test]
fn integer_answer_binds_as_integer() {
    let mut session = Session::new();
    let transcript = run(&mut session, "ask n:\nplot n + 1:", &["7"]);
    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .unwrap();
    assert_eq!(plain.text, "8\n");
}

#[test]
fn non_integer_answer_binds_as_string() {
    let mut session = Session::new();
    let transcript = run(&mut session, "ask n:\nplot \"got \" ~ n:", &["abc"]);
    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .unwrap();
    assert_eq!(plain.text, "got abc\n");
}

#[test]
fn dismissed_prompt_binds_empty_string() {
    let mut session = Session::new();
    // The provider models a dismissed dialog by returning the empty string.
    let transcript = run(&mut session, "ask n:\nplot \"[\" ~ n ~ \"]\":", &[""]);
    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .unwrap();
    assert_eq!(plain.text, "[]\n");
}

#[test]
fn prompts_are_answered_in_statement_order() {
    let mut session = Session::new();
    let transcript = run(
        &mut session,
        "ask a:\nask b:\nplot a ~ \"/\" ~ b:",
        &["first", "second"],
    );
    let plain = transcript
        .iter()
        .find(|e| e.style == EntryStyle::Plain)
        .unwrap();
    assert_eq!(plain.text, "first/second\n");
}
