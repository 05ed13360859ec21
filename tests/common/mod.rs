//! Shared helpers for koan integration tests.

use std::time::Duration;

use koan::spec::example::Example;
use koan::spec::Spec;
use koan::Formatter;

/// Every formatter callback, recorded in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    BeginTesting,
    EndTesting,
    EnterSpec(String),
    LeaveSpec(String, bool),
    EnterExample(String),
    LeaveExample(String, bool),
    Result {
        path: String,
        success: bool,
        reason: String,
    },
}

/// Formatter that records the event stream for assertions.
#[derive(Default)]
pub struct RecordingFormatter {
    pub events: Vec<Event>,
}

impl RecordingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full paths of examples that reported a result, in order.
    pub fn reported_examples(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Result { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// The recorded result for one example path.
    pub fn result_for(&self, path: &str) -> Option<(bool, String)> {
        self.events.iter().find_map(|event| match event {
            Event::Result {
                path: p,
                success,
                reason,
            } if p == path => Some((*success, reason.clone())),
            _ => None,
        })
    }
}

impl Formatter for RecordingFormatter {
    fn on_begin_testing(&mut self) {
        self.events.push(Event::BeginTesting);
    }

    fn on_end_testing(&mut self) {
        self.events.push(Event::EndTesting);
    }

    fn on_enter_spec(&mut self, spec: &Spec) {
        self.events.push(Event::EnterSpec(spec.full_path().to_string()));
    }

    fn on_leave_spec(&mut self, spec: &Spec, has_next: bool) {
        self.events
            .push(Event::LeaveSpec(spec.full_path().to_string(), has_next));
    }

    fn on_enter_example(&mut self, example: &Example) {
        self.events
            .push(Event::EnterExample(example.full_path().to_string()));
    }

    fn on_leave_example(&mut self, example: &Example, has_next: bool) {
        self.events
            .push(Event::LeaveExample(example.full_path().to_string(), has_next));
    }

    fn on_example_result(
        &mut self,
        example: &Example,
        success: bool,
        reason: &str,
        _duration: Duration,
    ) {
        self.events.push(Event::Result {
            path: example.full_path().to_string(),
            success,
            reason: reason.to_string(),
        });
    }
}
