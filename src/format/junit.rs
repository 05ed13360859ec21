//! JUnit XML renderer.
//!
//! Collects one test case per example result and writes a single
//! `<testsuite>` document at end-of-testing. Case class names are the
//! registering source file; case names are the example's full display
//! path, so CI tooling shows the spec nesting.

use std::io::Write;
use std::time::Duration;

use super::{Formatter, Indent};
use crate::spec::example::Example;
use crate::spec::Spec;

struct TestCase {
    classname: String,
    name: String,
    success: bool,
    reason: String,
    time: Duration,
}

pub struct JunitFormatter<W: Write> {
    out: W,
    cases: Vec<TestCase>,
    failures: usize,
    total_time: Duration,
}

impl<W: Write> JunitFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cases: Vec::new(),
            failures: 0,
            total_time: Duration::ZERO,
        }
    }
}

impl<W: Write> Formatter for JunitFormatter<W> {
    fn on_begin_testing(&mut self) {}

    fn on_end_testing(&mut self) {
        let mut indent = Indent::default();
        let _ = writeln!(self.out, "<?xml version=\"1.0\" encoding=\"utf-8\"?>");
        let _ = writeln!(
            self.out,
            "<testsuite errors=\"0\" failures=\"{}\" skipped=\"0\" tests=\"{}\" time=\"{:.9}\">",
            self.failures,
            self.cases.len(),
            self.total_time.as_secs_f64()
        );
        indent.push();

        for case in &self.cases {
            let open = format!(
                "{}<testcase classname=\"{}\" name=\"{}\" time=\"{:.9}\"",
                indent.prefix(),
                xml_escape(&case.classname),
                xml_escape(&case.name),
                case.time.as_secs_f64()
            );
            if case.success {
                let _ = writeln!(self.out, "{open}/>");
            } else {
                let _ = writeln!(self.out, "{open}>");
                indent.push();
                let _ = writeln!(
                    self.out,
                    "{}<failure message=\"{}\" type=\"expect\"/>",
                    indent.prefix(),
                    xml_escape(&case.reason)
                );
                indent.pop();
                let _ = writeln!(self.out, "{}</testcase>", indent.prefix());
            }
        }

        indent.pop();
        let _ = writeln!(self.out, "</testsuite>");
    }

    fn on_enter_spec(&mut self, _spec: &Spec) {}

    fn on_leave_spec(&mut self, _spec: &Spec, _has_next: bool) {}

    fn on_enter_example(&mut self, _example: &Example) {}

    fn on_leave_example(&mut self, _example: &Example, _has_next: bool) {}

    fn on_example_result(
        &mut self,
        example: &Example,
        success: bool,
        reason: &str,
        duration: Duration,
    ) {
        self.cases.push(TestCase {
            classname: example.source_file().to_string(),
            name: example.full_path().to_string(),
            success,
            reason: reason.to_string(),
            time: duration,
        });
        self.total_time += duration;
        if !success {
            self.failures += 1;
        }
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
