//! The formatter boundary: ordered lifecycle events emitted by a run.
//!
//! The engine knows nothing about output streams, color, or layout; it
//! only calls the methods below in traversal order. The renderers in
//! this module (console, JSON, JUnit) are consumers of the contract,
//! not part of the execution engine.

use std::time::Duration;

use crate::spec::example::Example;
use crate::spec::Spec;

pub mod console;
pub mod json;
pub mod junit;

pub use self::console::ConsoleFormatter;
pub use self::json::JsonFormatter;
pub use self::junit::JunitFormatter;

/// Event sink for suite/spec/example lifecycle and results.
///
/// `has_next` on the leave events tells a renderer whether a sibling
/// follows, so it can place separators without lookahead.
pub trait Formatter {
    /// Brackets the entire run, before the first spec.
    fn on_begin_testing(&mut self) {}

    /// Brackets the entire run, after the last spec.
    fn on_end_testing(&mut self) {}

    fn on_enter_spec(&mut self, spec: &Spec);
    fn on_leave_spec(&mut self, spec: &Spec, has_next: bool);

    fn on_enter_example(&mut self, example: &Example);
    fn on_leave_example(&mut self, example: &Example, has_next: bool);

    /// The single outcome of an example; `reason` is empty on success.
    fn on_example_result(
        &mut self,
        example: &Example,
        success: bool,
        reason: &str,
        duration: Duration,
    );
}

/// Shared indentation state for renderers that nest output by tree
/// depth.
#[derive(Debug, Default)]
pub(crate) struct Indent {
    level: usize,
}

impl Indent {
    pub(crate) fn push(&mut self) {
        self.level += 1;
    }

    pub(crate) fn pop(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Two spaces per level, as a prefix string.
    pub(crate) fn prefix(&self) -> String {
        "  ".repeat(self.level)
    }
}
