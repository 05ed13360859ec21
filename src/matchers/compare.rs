//! Comparison matchers: `==`, `!=`, `<`, `>`, `<=`, `>=`.
//!
//! Equality and ordering are split so that `equals` only demands
//! `PartialEq` of the got type; the four ordering matchers share one
//! struct parameterized by an [`Ordering`] operator. All six share the
//! failure-message shape ("Expected G to be lower (`<`) than E, but was
//! not").

use std::fmt::Debug;

use super::Matcher;

/// Matches when got `==` expected.
pub struct EqualMatcher<E> {
    expected: E,
}

impl<T, E> Matcher<T> for EqualMatcher<E>
where
    T: PartialEq<E> + Debug + ?Sized,
    E: Debug,
{
    fn matches(&self, got: &T) -> bool {
        got.eq(&self.expected)
    }

    fn reason(&self, got: &T, negated: bool) -> String {
        compare_reason(&got, &self.expected, "to be equal (`==`) with", negated)
    }
}

/// Matches when got `!=` expected.
pub struct NotEqualMatcher<E> {
    expected: E,
}

impl<T, E> Matcher<T> for NotEqualMatcher<E>
where
    T: PartialEq<E> + Debug + ?Sized,
    E: Debug,
{
    fn matches(&self, got: &T) -> bool {
        got.ne(&self.expected)
    }

    fn reason(&self, got: &T, negated: bool) -> String {
        compare_reason(&got, &self.expected, "to be not equal (`!=`) with", negated)
    }
}

/// The operator an [`OrderingMatcher`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    LowerThan,
    GreaterThan,
    LowerOrEqual,
    GreaterOrEqual,
}

impl Ordering {
    fn text(self) -> &'static str {
        match self {
            Ordering::LowerThan => "to be lower (`<`) than",
            Ordering::GreaterThan => "to be greater (`>`) than",
            Ordering::LowerOrEqual => "to be lower or equal (`<=`) than",
            Ordering::GreaterOrEqual => "to be greater or equal (`>=`) than",
        }
    }
}

/// Compares the got value against a captured expected value with one of
/// the four ordering operators.
pub struct OrderingMatcher<E> {
    op: Ordering,
    expected: E,
}

impl<T, E> Matcher<T> for OrderingMatcher<E>
where
    T: PartialOrd<E> + Debug + ?Sized,
    E: Debug,
{
    fn matches(&self, got: &T) -> bool {
        match self.op {
            Ordering::LowerThan => got.lt(&self.expected),
            Ordering::GreaterThan => got.gt(&self.expected),
            Ordering::LowerOrEqual => got.le(&self.expected),
            Ordering::GreaterOrEqual => got.ge(&self.expected),
        }
    }

    fn reason(&self, got: &T, negated: bool) -> String {
        compare_reason(&got, &self.expected, self.op.text(), negated)
    }
}

/// Shared "Expected G (not) <op> E, but was (not)" message builder.
pub(crate) fn compare_reason<G: Debug + ?Sized, E: Debug + ?Sized>(
    got: &G,
    expected: &E,
    op_text: &str,
    negated: bool,
) -> String {
    let mut out = format!("Expected {got:?}");
    if negated {
        out.push_str(" not");
    }
    out.push(' ');
    out.push_str(op_text);
    out.push_str(&format!(" {expected:?}, but was"));
    if !negated {
        out.push_str(" not");
    }
    out
}

/// Matches when got `==` expected.
pub fn equals<E>(expected: E) -> EqualMatcher<E> {
    EqualMatcher { expected }
}

/// Matches when got `!=` expected.
pub fn not_equals<E>(expected: E) -> NotEqualMatcher<E> {
    NotEqualMatcher { expected }
}

/// Matches when got `<` expected.
pub fn less_than<E>(expected: E) -> OrderingMatcher<E> {
    OrderingMatcher {
        op: Ordering::LowerThan,
        expected,
    }
}

/// Matches when got `>` expected.
pub fn greater_than<E>(expected: E) -> OrderingMatcher<E> {
    OrderingMatcher {
        op: Ordering::GreaterThan,
        expected,
    }
}

/// Matches when got `<=` expected.
pub fn less_or_equal<E>(expected: E) -> OrderingMatcher<E> {
    OrderingMatcher {
        op: Ordering::LowerOrEqual,
        expected,
    }
}

/// Matches when got `>=` expected.
pub fn greater_or_equal<E>(expected: E) -> OrderingMatcher<E> {
    OrderingMatcher {
        op: Ordering::GreaterOrEqual,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_matches_equal_values() {
        assert!(equals(5).matches(&5));
        assert!(!equals(6).matches(&5));
        assert!(not_equals(6).matches(&5));
    }

    #[test]
    fn equality_works_without_an_ordering() {
        #[derive(Debug, PartialEq)]
        struct Opaque(u8);
        assert!(equals(Opaque(1)).matches(&Opaque(1)));
    }

    #[test]
    fn ordering_operators_dispatch() {
        assert!(less_than(10).matches(&5));
        assert!(greater_than(3).matches(&5));
        assert!(less_or_equal(5).matches(&5));
        assert!(greater_or_equal(5).matches(&5));
        assert!(!less_than(5).matches(&5));
    }

    #[test]
    fn reason_is_truthful_for_both_polarities() {
        let m = equals(6);
        assert_eq!(
            Matcher::<i32>::reason(&m, &5, false),
            "Expected 5 to be equal (`==`) with 6, but was not"
        );
        assert_eq!(
            Matcher::<i32>::reason(&m, &6, true),
            "Expected 6 not to be equal (`==`) with 6, but was"
        );
    }
}
