//! Regular-expression matcher over string-like values.

use std::fmt::Debug;

use regex::Regex;

use crate::diagnostics::fail;

use super::Matcher;

/// Matches when the got text contains a match for the pattern.
pub struct RegexMatcher {
    pattern: Regex,
}

impl RegexMatcher {
    /// Wraps a precompiled pattern.
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl<T: AsRef<str> + Debug + ?Sized> Matcher<T> for RegexMatcher {
    fn matches(&self, got: &T) -> bool {
        self.pattern.is_match(got.as_ref())
    }

    fn reason(&self, got: &T, negated: bool) -> String {
        let mut out = format!("Expected {got:?}");
        if negated {
            out.push_str(" not");
        }
        out.push_str(&format!(" to match (regex) /{}/, but has", self.pattern.as_str()));
        if !negated {
            out.push_str(" not");
        }
        out
    }
}

/// Matches when got matches the regex pattern.
///
/// An invalid pattern fails the enclosing example (an assertion written
/// against a bad pattern is a test-author error, isolated like any other
/// failure).
pub fn matches_regex(pattern: &str) -> RegexMatcher {
    let pattern = Regex::new(pattern)
        .unwrap_or_else(|error| fail(format!("invalid regex /{pattern}/: {error}")));
    RegexMatcher { pattern }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ExpectationFailed;

    #[test]
    fn searches_anywhere_in_the_text() {
        assert!(matches_regex("hel+o").matches("hello world"));
        assert!(!matches_regex("helo").matches("hello world"));
    }

    #[test]
    fn accepts_owned_strings() {
        let text = String::from("status=ready");
        assert!(matches_regex("status=(ready|done)").matches(&text));
    }

    #[test]
    fn invalid_pattern_fails_the_example() {
        let caught = std::panic::catch_unwind(|| {
            matches_regex("(unclosed");
        })
        .unwrap_err();
        let failure = caught.downcast_ref::<ExpectationFailed>().unwrap();
        assert!(failure.message.contains("invalid regex"));
    }

    #[test]
    fn reason_quotes_the_pattern() {
        let m = matches_regex("hel+o");
        let reason = Matcher::<str>::reason(&m, "bye", false);
        assert_eq!(reason, "Expected \"bye\" to match (regex) /hel+o/, but has not");
    }
}
