//! A single executable test case and its failure-catching boundary.
//!
//! Examples are the only place failures are caught. An
//! [`ExpectationFailed`] payload escaping the body becomes a failed
//! result carrying the expectation's own message; *any other* panic is
//! also caught and reported as a failed result rather than tearing down
//! the suite. Cleanup actions run unconditionally after the result has
//! been reported, in registration order.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Instant;

use crate::diagnostics::{fail, panic_summary, ExpectationFailed};
use crate::format::Formatter;

pub type ExampleBody = Rc<dyn Fn(&mut Example)>;
pub type CleanupAction = Box<dyn FnOnce()>;

/// A leaf test case: a name, a body, and deferred cleanup actions.
pub struct Example {
    name: String,
    path: String,
    source_file: &'static str,
    body: ExampleBody,
    cleanups: Vec<CleanupAction>,
}

impl Example {
    pub(crate) fn new(
        name: String,
        path: String,
        source_file: &'static str,
        body: ExampleBody,
    ) -> Self {
        Self {
            name,
            path,
            source_file,
            body,
            cleanups: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Space-joined ancestor names down to this example.
    pub fn full_path(&self) -> &str {
        &self.path
    }

    /// The file that registered this example, for JUnit-style reports.
    pub fn source_file(&self) -> &'static str {
        self.source_file
    }

    /// Registers a scoped release action to run after the body completes
    /// or fails, in registration order. For manually-owned resources that
    /// need deterministic teardown outside of automatic scoping.
    pub fn cleanup(&mut self, action: impl FnOnce() + 'static) {
        self.cleanups.push(Box::new(action));
    }

    /// Executes the body inside the failure-catching boundary and reports
    /// the outcome through the formatter. Returns whether the example
    /// passed.
    pub fn run(&mut self, formatter: &mut dyn Formatter, has_next: bool) -> bool {
        formatter.on_enter_example(self);

        let body = Rc::clone(&self.body);
        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| (*body)(&mut *self)));
        let elapsed = started.elapsed();

        let (success, reason) = match outcome {
            Ok(()) => (true, String::new()),
            Err(payload) => (false, failure_reason(payload)),
        };
        formatter.on_example_result(self, success, &reason, elapsed);
        formatter.on_leave_example(self, has_next);

        // Cleanups run last and unconditionally. A panicking cleanup
        // cannot amend the already-reported result; it is surfaced on
        // stderr and the remaining actions still run.
        for action in self.cleanups.drain(..) {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(action)) {
                eprintln!(
                    "koan: cleanup action panicked in example '{}': {}",
                    self.path,
                    panic_summary(payload.as_ref())
                );
            }
        }

        success
    }
}

fn failure_reason(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<ExpectationFailed>() {
        Ok(failure) => failure.message,
        Err(other) => format!("Unexpected {}", panic_summary(other.as_ref())),
    }
}

/// Asserts that `block` completes without panicking; any panic fails the
/// enclosing example with a message naming the payload.
pub fn expect_no_panic(block: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(block)) {
        fail(format!(
            "Expected not to panic, but did: {}",
            panic_summary(payload.as_ref())
        ));
    }
}

/// Asserts that `block` panics with a payload of type `K`.
///
/// A panic with a different payload type, or no panic at all, fails the
/// enclosing example.
pub fn expect_panic<K: Any>(block: impl FnOnce()) {
    let expected = std::any::type_name::<K>();
    match catch_unwind(AssertUnwindSafe(block)) {
        Ok(()) => fail(format!("Expected to panic with {expected}, but did not")),
        Err(payload) => {
            if payload.downcast_ref::<K>().is_none() {
                fail(format!(
                    "Expected to panic with {expected}, but raised a different {}",
                    panic_summary(payload.as_ref())
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BrokenPipe;

    #[test]
    fn expect_panic_accepts_the_named_payload_type() {
        expect_panic::<BrokenPipe>(|| std::panic::panic_any(BrokenPipe));
    }

    #[test]
    fn expect_panic_rejects_a_different_payload_type() {
        let caught =
            catch_unwind(|| expect_panic::<BrokenPipe>(|| panic!("something else"))).unwrap_err();
        let failure = caught.downcast_ref::<ExpectationFailed>().unwrap();
        assert!(failure.message.contains("BrokenPipe"));
        assert!(failure.message.contains("different"));
    }

    #[test]
    fn expect_panic_rejects_silence() {
        let caught = catch_unwind(|| expect_panic::<BrokenPipe>(|| {})).unwrap_err();
        let failure = caught.downcast_ref::<ExpectationFailed>().unwrap();
        assert!(failure.message.ends_with("but did not"));
    }

    #[test]
    fn expect_no_panic_names_the_payload() {
        let caught = catch_unwind(|| expect_no_panic(|| panic!("boom"))).unwrap_err();
        let failure = caught.downcast_ref::<ExpectationFailed>().unwrap();
        assert!(failure.message.contains("boom"));
    }

    #[test]
    fn expect_no_panic_passes_quiet_blocks() {
        expect_no_panic(|| {});
    }
}
