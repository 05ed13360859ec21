//! Convenience re-exports for spec files and runner binaries.

pub use crate::diagnostics::{fail, ExpectationFailed, KoanError};
pub use crate::format::{ConsoleFormatter, Formatter, JsonFormatter, JunitFormatter};
pub use crate::matchers::{
    contains, equals, greater_or_equal, greater_than, identical_to, instance_of, less_or_equal,
    less_than, matches_regex, not_equals, Matcher,
};
pub use crate::runner::{RunSummary, Runner};
pub use crate::spec::example::{expect_no_panic, expect_panic, Example};
pub use crate::spec::expectation::{expect, Expectation};
pub use crate::spec::Spec;
