//! The run coordinator: a process-wide registry of top-level specs.
//!
//! The registry is an explicit value, built by ordinary function calls at
//! program start and consumed by [`Runner::run_all`]; there are no
//! load-time side effects and no global state. Bodies and hooks are
//! `Rc`-shared, so the whole engine is deliberately `!Send`: one logical
//! thread of control owns a suite for its lifetime.

use std::panic;

use crate::diagnostics::KoanError;
use crate::format::Formatter;
use crate::spec::Spec;

/// Aggregated outcome of a suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Ordered registry of top-level specs; append-only except for the
/// pruning a marked-only run performs.
#[derive(Default)]
pub struct Runner {
    specs: Vec<Spec>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a top-level spec. The definition body stays unevaluated
    /// until the spec is first run or searched.
    pub fn describe(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Spec) + 'static) {
        self.specs.push(Spec::new(name, body));
    }

    /// Number of registered top-level specs.
    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Resolves a slash-delimited path and marks the target spec,
    /// flagging every ancestor on the way. Resolution populates only the
    /// nodes along the path. Fatal on failure: the caller is expected to
    /// report the error and terminate before any testing begins.
    pub fn mark(&mut self, path: &str) -> Result<(), KoanError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (first, rest) = segments
            .split_first()
            .ok_or_else(|| KoanError::lookup(path, path))?;
        let spec = self
            .specs
            .iter_mut()
            .find(|spec| spec.name() == *first)
            .ok_or_else(|| KoanError::lookup(path, *first))?;
        if rest.is_empty() {
            spec.mark();
        } else {
            spec.mark_path(rest, path)?;
        }
        Ok(())
    }

    /// Runs the suite, driving the formatter lifecycle. With
    /// `only_marked`, the registry is first pruned to specs on marked
    /// paths and the survivors run in marked-only mode.
    ///
    /// Example bodies fail by panicking; while the run is in flight the
    /// default panic hook is replaced with a silent one so payloads do
    /// not splatter stderr, and restored afterwards.
    pub fn run_all(&mut self, formatter: &mut dyn Formatter, only_marked: bool) -> RunSummary {
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));

        formatter.on_begin_testing();

        if only_marked {
            self.specs
                .retain(|spec| spec.is_marked() || spec.has_marked_descendants());
        }

        let mut summary = RunSummary::default();
        let spec_count = self.specs.len();
        for (index, spec) in self.specs.iter_mut().enumerate() {
            let has_next = index + 1 < spec_count;
            let (passed, failed) = if only_marked {
                spec.run_marked_only(formatter, has_next)
            } else {
                spec.run(formatter, has_next)
            };
            summary.passed += passed;
            summary.failed += failed;
        }

        formatter.on_end_testing();

        panic::set_hook(previous_hook);
        summary
    }
}
