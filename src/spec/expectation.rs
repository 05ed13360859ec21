//! The fluent expectation API: `expect(&value).to(matcher)`.
//!
//! An [`Expectation`] is a transient borrow of one "got" value, consumed
//! by exactly one `to` / `to_not` / named-sugar call. It has no state and
//! no side effects beyond running the chosen matcher; failures propagate
//! exactly as the matcher raises them.

use std::any::Any;
use std::fmt::Debug;

use crate::matchers::{
    contains, equals, greater_or_equal, greater_than, identical_to, instance_of, less_or_equal,
    less_than, matches_regex, not_equals, Container, Matcher,
};

/// One value under assertion. Created by [`expect`], used once.
pub struct Expectation<'a, T: ?Sized> {
    got: &'a T,
}

/// Binds a value to the assertion API for one statement.
pub fn expect<T: ?Sized>(got: &T) -> Expectation<'_, T> {
    Expectation { got }
}

impl<'a, T: ?Sized> Expectation<'a, T> {
    /// Checks the matcher with positive polarity.
    pub fn to<M: Matcher<T>>(self, matcher: M) {
        matcher.check(self.got, false);
    }

    /// Checks the matcher with negated polarity.
    pub fn to_not<M: Matcher<T>>(self, matcher: M) {
        matcher.check(self.got, true);
    }

    // The named operations below are sugar: each constructs the
    // corresponding matcher and checks it with the appropriate polarity.

    pub fn equals<E>(self, expected: E)
    where
        T: PartialEq<E> + Debug,
        E: Debug,
    {
        self.to(equals(expected));
    }

    pub fn not_equals<E>(self, expected: E)
    where
        T: PartialEq<E> + Debug,
        E: Debug,
    {
        self.to(not_equals(expected));
    }

    pub fn less_than<E>(self, expected: E)
    where
        T: PartialOrd<E> + Debug,
        E: Debug,
    {
        self.to(less_than(expected));
    }

    pub fn greater_than<E>(self, expected: E)
    where
        T: PartialOrd<E> + Debug,
        E: Debug,
    {
        self.to(greater_than(expected));
    }

    pub fn less_or_equal<E>(self, expected: E)
    where
        T: PartialOrd<E> + Debug,
        E: Debug,
    {
        self.to(less_or_equal(expected));
    }

    pub fn greater_or_equal<E>(self, expected: E)
    where
        T: PartialOrd<E> + Debug,
        E: Debug,
    {
        self.to(greater_or_equal(expected));
    }

    pub fn contains<E>(self, expected: E)
    where
        T: Container<E> + Debug,
        E: Debug,
    {
        self.to(contains(expected));
    }

    pub fn not_contains<E>(self, expected: E)
    where
        T: Container<E> + Debug,
        E: Debug,
    {
        self.to_not(contains(expected));
    }

    /// Asserts address identity with `other` (the same object, not an
    /// equal one).
    pub fn is_identical_to(self, other: &T)
    where
        T: Debug,
    {
        self.to(identical_to(other));
    }

    /// Asserts the value's runtime type is exactly `U`.
    pub fn is_instance_of<U: Any>(self)
    where
        T: Any + Debug + Sized,
    {
        self.to(instance_of::<U>());
    }

    pub fn matches_regex(self, pattern: &str)
    where
        T: AsRef<str> + Debug,
    {
        self.to(matches_regex(pattern));
    }
}
