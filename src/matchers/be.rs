//! Identity and type-membership matchers.

use std::any::{Any, TypeId};
use std::fmt::Debug;
use std::marker::PhantomData;

use super::Matcher;

/// Matches when got is the *same object* as the expected reference
/// (address identity, not value equality).
pub struct IdenticalMatcher<'e, T: ?Sized> {
    expected: &'e T,
}

impl<'e, T: Debug + ?Sized> Matcher<T> for IdenticalMatcher<'e, T> {
    fn matches(&self, got: &T) -> bool {
        std::ptr::eq(got, self.expected)
    }

    fn reason(&self, got: &T, negated: bool) -> String {
        let mut out = format!("Expected {got:?}");
        if negated {
            out.push_str(" not");
        }
        out.push_str(&format!(" to be {:?}, but was", self.expected));
        if !negated {
            out.push_str(" not");
        }
        out
    }
}

/// Matches when got is the expected reference itself.
pub fn identical_to<T: ?Sized>(expected: &T) -> IdenticalMatcher<'_, T> {
    IdenticalMatcher { expected }
}

/// Matches when the got value's runtime type is exactly `U`.
///
/// This is an explicit `TypeId` query; subtype relationships do not exist
/// here, so a value only ever "is a" its own concrete type.
pub struct InstanceMatcher<U: Any> {
    expected: PhantomData<U>,
}

impl<T: Any + Debug, U: Any> Matcher<T> for InstanceMatcher<U> {
    fn matches(&self, got: &T) -> bool {
        got.type_id() == TypeId::of::<U>()
    }

    fn reason(&self, got: &T, negated: bool) -> String {
        let mut out = format!("Expected {got:?}");
        if negated {
            out.push_str(" not");
        }
        out.push_str(&format!(" to be a {}, but was", std::any::type_name::<U>()));
        if !negated {
            out.push_str(" not");
        }
        out
    }
}

/// Matches when got's runtime type is exactly `U`.
pub fn instance_of<U: Any>() -> InstanceMatcher<U> {
    InstanceMatcher {
        expected: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_address_equality() {
        let a = vec![1, 2, 3];
        let b = vec![1, 2, 3];
        assert!(identical_to(&a).matches(&a));
        assert!(!identical_to(&b).matches(&a));
    }

    #[test]
    fn instance_of_compares_runtime_type_ids() {
        assert!(instance_of::<u32>().matches(&7u32));
        assert!(!instance_of::<u64>().matches(&7u32));
    }

    #[test]
    fn instance_reason_names_the_type() {
        let m = instance_of::<String>();
        let reason = Matcher::<u32>::reason(&m, &7, false);
        assert!(reason.contains("to be a"));
        assert!(reason.contains("String"));
        assert!(reason.ends_with("but was not"));
    }
}
