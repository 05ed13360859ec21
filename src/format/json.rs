//! JSON renderer: a nested document mirroring the spec tree.
//!
//! The document is an array of nodes; specs carry their children in
//! `body`, examples carry their outcome:
//!
//! ```json
//! [
//!   { "type": "spec", "desc": "arithmetic", "body": [
//!     { "type": "example", "name": "adds", "result": "success",
//!       "reason": "", "time": 0.000012 }
//!   ] }
//! ]
//! ```

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use super::Formatter;
use crate::spec::example::Example;
use crate::spec::Spec;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ReportNode {
    Spec {
        desc: String,
        body: Vec<ReportNode>,
    },
    Example {
        name: String,
        result: &'static str,
        reason: String,
        /// Elapsed seconds.
        time: f64,
    },
}

/// Builds the document during the run and writes it at end-of-testing.
pub struct JsonFormatter<W: Write> {
    out: W,
    pretty: bool,
    /// One frame per open spec, plus the root document at the bottom.
    stack: Vec<Frame>,
}

struct Frame {
    desc: Option<String>,
    body: Vec<ReportNode>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self {
            out,
            pretty,
            stack: vec![Frame {
                desc: None,
                body: Vec::new(),
            }],
        }
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().expect("formatter events out of order")
    }
}

impl<W: Write> Formatter for JsonFormatter<W> {
    fn on_begin_testing(&mut self) {
        self.stack.clear();
        self.stack.push(Frame {
            desc: None,
            body: Vec::new(),
        });
    }

    fn on_end_testing(&mut self) {
        let root = self.stack.pop().expect("formatter events out of order");
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &root.body)
        } else {
            serde_json::to_writer(&mut self.out, &root.body)
        };
        if result.is_ok() {
            let _ = writeln!(self.out);
        }
    }

    fn on_enter_spec(&mut self, spec: &Spec) {
        self.stack.push(Frame {
            desc: Some(spec.name().to_string()),
            body: Vec::new(),
        });
    }

    fn on_leave_spec(&mut self, _spec: &Spec, _has_next: bool) {
        let frame = self.stack.pop().expect("formatter events out of order");
        let node = ReportNode::Spec {
            desc: frame.desc.unwrap_or_default(),
            body: frame.body,
        };
        self.top().body.push(node);
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
        let node = ReportNode::Example {
            name: example.name().to_string(),
            result: if success { "success" } else { "failed" },
            reason: reason.to_string(),
            time: duration.as_secs_f64(),
        };
        self.top().body.push(node);
    }
}
