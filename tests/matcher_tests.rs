//! Integration tests for the matcher protocol and the expectation API.

use std::panic::{catch_unwind, AssertUnwindSafe};

use koan::matchers::Matcher;
use koan::prelude::*;

/// Runs an assertion block and returns the expectation-failure message,
/// panicking if the block did not fail that way.
fn failure_message(block: impl FnOnce()) -> String {
    let payload = catch_unwind(AssertUnwindSafe(block)).expect_err("block should have failed");
    payload
        .downcast_ref::<ExpectationFailed>()
        .expect("payload should be an ExpectationFailed")
        .message
        .clone()
}

/// A matcher with a controllable verdict, for protocol-level tests.
struct FixedVerdict(bool);

impl Matcher<i32> for FixedVerdict {
    fn matches(&self, _got: &i32) -> bool {
        self.0
    }

    fn reason(&self, _got: &i32, negated: bool) -> String {
        format!("fixed verdict (negated: {negated})")
    }
}

#[test]
fn check_succeeds_iff_match_agrees_with_polarity() {
    // positive polarity: succeeds iff matches() is true
    FixedVerdict(true).check(&0, false);
    failure_message(|| FixedVerdict(false).check(&0, false));
    // negated polarity: succeeds iff matches() is false
    FixedVerdict(false).check(&0, true);
    failure_message(|| FixedVerdict(true).check(&0, true));
}

#[test]
fn reason_receives_the_polarity_of_the_failing_check() {
    let message = failure_message(|| FixedVerdict(true).check(&0, true));
    assert_eq!(message, "fixed verdict (negated: true)");
}

#[test]
fn equals_scenarios() {
    expect(&5).to(equals(5));
    expect(&5).to_not(equals(6));

    let message = failure_message(|| expect(&5).to(equals(6)));
    assert!(message.contains('5'));
    assert!(message.contains('6'));
    assert!(message.contains("equal"));

    let message = failure_message(|| expect(&5).to_not(equals(5)));
    assert!(message.contains("not"));
}

#[test]
fn comparison_scenarios() {
    expect(&5).less_than(6);
    expect(&5).greater_than(4);
    expect(&5).less_or_equal(5);
    expect(&5).greater_or_equal(5);

    let message = failure_message(|| expect(&5).less_than(5));
    assert!(message.contains("lower"));
    let message = failure_message(|| expect(&5).greater_than(5));
    assert!(message.contains("greater"));
}

#[test]
fn containment_scenarios() {
    expect(&vec![1, 2, 3]).to(contains(2));
    expect(&vec![1, 2, 3]).to_not(contains(9));

    let message = failure_message(|| expect(&vec![1, 2, 3]).to(contains(9)));
    assert!(message.contains("to contain 9"));
    assert!(message.contains("but has not"));

    expect("hello world").contains('w');
    expect("hello world").not_contains('x');
    expect("hello world").contains("wor");
}

#[test]
fn string_comparisons_work_across_owned_and_borrowed() {
    let owned = String::from("hello world");
    expect(&owned).equals("hello world");
    expect(&owned).not_equals("good morning");
}

#[test]
fn regex_scenarios() {
    expect("hello world").matches_regex("hel+o");
    let message = failure_message(|| expect("hello world").matches_regex("helo"));
    assert!(message.contains("/helo/"));
    assert!(message.contains("but has not"));
}

#[test]
fn identity_scenarios() {
    let first = vec![1, 2, 3];
    let second = vec![1, 2, 3];
    expect(&first).is_identical_to(&first);
    let message = failure_message(|| expect(&first).is_identical_to(&second));
    assert!(message.contains("to be"));
    assert!(message.ends_with("but was not"));
}

#[test]
fn instance_scenarios() {
    expect(&7u32).is_instance_of::<u32>();
    let message = failure_message(|| expect(&7u32).is_instance_of::<String>());
    assert!(message.contains("String"));
}

#[test]
fn expect_panic_scenarios() {
    #[derive(Debug)]
    struct BoomError;

    expect_panic::<BoomError>(|| std::panic::panic_any(BoomError));

    let message = failure_message(|| expect_panic::<BoomError>(|| {}));
    assert!(message.contains("BoomError"));
    assert!(message.ends_with("but did not"));

    let message = failure_message(|| expect_panic::<BoomError>(|| panic!("other")));
    assert!(message.contains("BoomError"));
    assert!(message.contains("other"));
}

#[test]
fn expect_no_panic_scenarios() {
    expect_no_panic(|| {});
    let message = failure_message(|| expect_no_panic(|| panic!("x")));
    assert!(message.contains("Expected not to panic"));
    assert!(message.contains('x'));
}

#[test]
fn negated_sugar_mirrors_to_not() {
    expect(&5).not_equals(6);
    expect(&vec![1, 2, 3]).not_contains(9);
    let direct = failure_message(|| expect(&5).to_not(equals(5)));
    let sugared = failure_message(|| expect(&5).not_equals(5));
    // to_not(equals) and not_equals produce different operators but both
    // report the negation truthfully.
    assert!(direct.contains("not to be equal"));
    assert!(sugared.contains("not equal"));
}
