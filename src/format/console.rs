//! Console renderer: an indentation-nested tree with colored results.

use std::io::Write;
use std::time::Duration;

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use super::{Formatter, Indent};
use crate::spec::example::Example;
use crate::spec::Spec;

/// Renders the run as an indented tree: spec names as headings, green
/// example names on success, red with the failure reason beneath on
/// failure, and a summary line at the end.
pub struct ConsoleFormatter<W: WriteColor> {
    out: W,
    indent: Indent,
    last_line_empty: bool,
    passed: usize,
    failed: usize,
    elapsed: Duration,
}

impl ConsoleFormatter<StandardStream> {
    /// Writes to stdout with the given color behavior.
    pub fn stdout(color: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color))
    }
}

impl<W: Write> ConsoleFormatter<NoColor<W>> {
    /// Writes plain text to any sink; used for `--output` targets and
    /// for capturing in tests.
    pub fn plain(out: W) -> Self {
        Self::new(NoColor::new(out))
    }
}

impl<W: WriteColor> ConsoleFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: Indent::default(),
            last_line_empty: false,
            passed: 0,
            failed: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn reset_color(&mut self) {
        let _ = self.out.reset();
    }
}

impl<W: WriteColor> Formatter for ConsoleFormatter<W> {
    fn on_begin_testing(&mut self) {
        let _ = writeln!(self.out, "Start testing");
        let _ = writeln!(self.out, "========================================");
    }

    fn on_end_testing(&mut self) {
        let _ = writeln!(self.out, "========================================");
        let color = if self.failed > 0 {
            Color::Red
        } else {
            Color::Green
        };
        self.set_color(color);
        let _ = writeln!(
            self.out,
            "{} passed, {} failed ({:.3}s)",
            self.passed,
            self.failed,
            self.elapsed.as_secs_f64()
        );
        self.reset_color();
    }

    fn on_enter_spec(&mut self, spec: &Spec) {
        self.last_line_empty = false;
        let _ = writeln!(self.out, "{}{}", self.indent.prefix(), spec.name());
        self.indent.push();
    }

    fn on_leave_spec(&mut self, _spec: &Spec, _has_next: bool) {
        self.indent.pop();
        if !self.last_line_empty {
            let _ = writeln!(self.out);
            self.last_line_empty = true;
        }
    }

    fn on_enter_example(&mut self, _example: &Example) {}

    fn on_leave_example(&mut self, _example: &Example, _has_next: bool) {}

    fn on_example_result(
        &mut self,
        example: &Example,
        success: bool,
        reason: &str,
        duration: Duration,
    ) {
        self.last_line_empty = false;
        self.elapsed += duration;
        if success {
            self.passed += 1;
            self.set_color(Color::Green);
            let _ = writeln!(self.out, "{}{}", self.indent.prefix(), example.name());
        } else {
            self.failed += 1;
            self.set_color(Color::Red);
            let _ = writeln!(self.out, "{}{}", self.indent.prefix(), example.name());
            self.indent.push();
            let _ = writeln!(self.out, "{}{}", self.indent.prefix(), reason);
            self.indent.pop();
        }
        self.reset_color();
    }
}
