//! The matcher protocol and the built-in matchers.
//!
//! A matcher is a reusable, negation-aware predicate paired with a
//! failure-message generator. The protocol deliberately splits
//! [`Matcher::matches`] from [`Matcher::reason`]: message construction is
//! skipped entirely when an expectation holds, so passing assertions cost
//! nothing beyond the predicate itself.
//!
//! Negation is not matcher state. The caller (an [`Expectation`]) threads
//! the polarity of one invocation through [`Matcher::check`], and `reason`
//! receives the same flag so the message stays truthful either way:
//! "Expected X (not) to R Y, but was (not)".
//!
//! [`Expectation`]: crate::spec::expectation::Expectation

use crate::diagnostics::fail;

pub mod be;
pub mod compare;
pub mod contain;
pub mod regex;

pub use self::be::{identical_to, instance_of, IdenticalMatcher, InstanceMatcher};
pub use self::compare::{
    equals, greater_or_equal, greater_than, less_or_equal, less_than, not_equals, EqualMatcher,
    NotEqualMatcher, OrderingMatcher,
};
pub use self::contain::{contains, ContainMatcher, Container};
pub use self::regex::{matches_regex, RegexMatcher};

/// A predicate over values of `T` with a paired failure explanation.
pub trait Matcher<T: ?Sized> {
    /// Does `got` satisfy the predicate? Must be free of side effects.
    fn matches(&self, got: &T) -> bool;

    /// Human-readable explanation of a failed check, truthful for the
    /// given polarity.
    fn reason(&self, got: &T, negated: bool) -> String;

    /// Runs the protocol: succeeds silently iff `matches(got) != negated`,
    /// otherwise fails the enclosing example with `reason(got, negated)`.
    fn check(&self, got: &T, negated: bool) {
        if self.matches(got) != negated {
            return;
        }
        fail(self.reason(got, negated));
    }
}
