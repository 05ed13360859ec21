//! Unified diagnostics for the koan engine.
//!
//! Two failure channels exist and they never mix:
//!
//! - **Assertion failures** travel as panic payloads ([`ExpectationFailed`])
//!   raised by [`fail`] and are always caught at the example boundary. They
//!   become failed-example results, never process aborts.
//! - **Engine errors** ([`KoanError`]) are ordinary `Result` errors carried
//!   up to the launcher. The only fatal class is path-lookup failure, which
//!   is reported (as a `miette` diagnostic) before any testing begins.
//!
//! Any other panic escaping a test body is an *unexpected* panic: it is
//! caught at the same example boundary and summarized with
//! [`panic_summary`].

use std::any::Any;

use miette::Diagnostic;
use thiserror::Error;

/// Panic payload raised when an expectation does not hold.
///
/// Raised by [`fail`] from matcher checks and the `expect_panic` /
/// `expect_no_panic` helpers. The example runner downcasts escaping panic
/// payloads to this type to distinguish assertion failures from runaway
/// panics in test code.
#[derive(Debug)]
pub struct ExpectationFailed {
    pub message: String,
}

/// Fails the enclosing example with the given reason.
///
/// This is the single raise-point for assertion failures; everything the
/// expectation API reports funnels through here.
pub fn fail(message: impl Into<String>) -> ! {
    std::panic::panic_any(ExpectationFailed {
        message: message.into(),
    })
}

/// Errors surfaced to the invoking launcher rather than isolated to an
/// example.
#[derive(Debug, Error, Diagnostic)]
pub enum KoanError {
    /// A slash-delimited spec path did not resolve. Fatal to the run:
    /// reported before any testing begins.
    #[error("no spec found for path '{path}': segment '{segment}' did not match")]
    #[diagnostic(
        code(koan::lookup),
        help("spec paths are slash-delimited display names, e.g. 'arithmetic/division'")
    )]
    Lookup { path: String, segment: String },

    /// The report destination could not be opened for writing.
    #[error("cannot write report to '{path}'")]
    #[diagnostic(code(koan::report))]
    Report {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl KoanError {
    pub fn lookup(path: impl Into<String>, segment: impl Into<String>) -> Self {
        KoanError::Lookup {
            path: path.into(),
            segment: segment.into(),
        }
    }
}

/// Summarizes a caught panic payload for failure reports.
///
/// String payloads (the overwhelmingly common case: `panic!`, `assert!`,
/// `unwrap`) are quoted verbatim. [`ExpectationFailed`] payloads are
/// labeled as such so nested catch scopes stay truthful. Everything else
/// is opaque: Rust panic payloads carry no type name at runtime.
pub fn panic_summary(payload: &(dyn Any + Send)) -> String {
    if let Some(failure) = payload.downcast_ref::<ExpectationFailed>() {
        return format!("expectation failure: {}", failure.message);
    }
    if let Some(text) = payload.downcast_ref::<&str>() {
        return format!("panic: \"{text}\"");
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return format!("panic: \"{text}\"");
    }
    "panic with a non-string payload".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_raises_an_expectation_failed_payload() {
        let caught = std::panic::catch_unwind(|| fail("it went sideways")).unwrap_err();
        let failure = caught.downcast_ref::<ExpectationFailed>().unwrap();
        assert_eq!(failure.message, "it went sideways");
    }

    #[test]
    fn panic_summary_quotes_string_payloads() {
        let caught = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_summary(caught.as_ref()), "panic: \"boom\"");
    }

    #[test]
    fn panic_summary_labels_expectation_failures() {
        let caught = std::panic::catch_unwind(|| fail("nope")).unwrap_err();
        assert_eq!(panic_summary(caught.as_ref()), "expectation failure: nope");
    }

    #[test]
    fn lookup_error_carries_a_diagnostic_code() {
        let err = KoanError::lookup("a/b", "b");
        let code = Diagnostic::code(&err).unwrap().to_string();
        assert_eq!(code, "koan::lookup");
    }
}
