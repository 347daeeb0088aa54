//! End-to-end tests over fixture programs: parse, optimize, interpret.
//!
//! Every fixture runs twice, unfolded and folded, and both runs must
//! produce identical output - folding is not allowed to change semantics.

use pat_lang::{Interpreter, RuntimeError, optimize, parse};

/// Run a program with canned answers for its `ask` statements.
fn run(source: &str, answers: &[&str], fold: bool) -> Result<String, RuntimeError> {
    let mut program = parse(source).expect("fixture must parse");
    if fold {
        program = optimize(program).expect("fixture must fold");
    }
    let mut answers = answers.iter();
    let mut input = |_name: &str| answers.next().map(|s| s.to_string()).unwrap_or_default();
    let mut out = String::new();
    Interpreter::new(&mut out, &mut input, 1_000_000).run(&program)?;
    Ok(out)
}

fn assert_output(source: &str, answers: &[&str], expected: &str) {
    let plain = run(source, answers, false).expect("unfolded run failed");
    let folded = run(source, answers, true).expect("folded run failed");
    assert_eq!(plain, expected);
    assert_eq!(folded, expected, "folding changed program output");
}

// ============================================================================
// Fixture programs
// ============================================================================

#[test]
fn greeting_with_integer_input() {
    assert_output(
        include_str!("programs/greeting.pat"),
        &["Ada"],
        "Hello Ada\nNumber 4\nNumber 5\n",
    );
}

#[test]
fn greeting_with_dismissed_input() {
    // A dismissed prompt resolves to the empty string.
    assert_output(
        include_str!("programs/greeting.pat"),
        &[""],
        "Hello \nNumber 4\nNumber 5\n",
    );
}

#[test]
fn classify_matches_arm() {
    assert_output(include_str!("programs/classify.pat"), &["1"], "one\n");
}

#[test]
fn classify_falls_through_to_default() {
    assert_output(
        include_str!("programs/classify.pat"),
        &["7"],
        "square is 49\n",
    );
}

#[test]
fn classify_with_string_input_hits_default() {
    // "abc" stays a string, so the integer arms cannot match; the bind
    // statement then fails on string arithmetic.
    let err = run(include_str!("programs/classify.pat"), &["abc"], false).unwrap_err();
    assert!(matches!(err, RuntimeError::TypeMismatch(_)));
}

// ============================================================================
// Inline programs
// ============================================================================

#[test]
fn countdown_via_subtraction() {
    let source = "5 -> n:\nloop i in 0..5 { plot n - i: }";
    assert_output(source, &[], "5\n4\n3\n2\n1\n");
}

#[test]
fn nested_loops_multiply() {
    let source = "loop i in 1..3 { loop j in 1..3 { plot i * 10 + j: } }";
    assert_output(source, &[], "11\n12\n21\n22\n");
}

#[test]
fn division_by_zero_surfaces_at_runtime() {
    // The optimizer leaves constant division by zero for the runtime.
    let err = run("plot 1 / 0:", &[], true).unwrap_err();
    assert_eq!(err, RuntimeError::DivisionByZero);
}
