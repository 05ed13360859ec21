//! The spec tree: hierarchical containers of child specs and examples.
//!
//! A [`Spec`] moves through three states: *unpopulated* (its definition
//! body has not run), *populated* (children registered, body consumed),
//! and *executed* (run count ≥ 1; re-entry is allowed, population is
//! not). Population is deferred until a node is first run or searched so
//! that resolving one named path never constructs unrelated subtrees.
//!
//! Hook scoping:
//!
//! - spec-level hooks (`before_all` / `after_all`) belong to the node
//!   that registered them and are NOT inherited by children;
//! - example-level hooks (`before_each` / `after_each`) apply to every
//!   example in the subtree. Ancestor hooks run before the node's own,
//!   outermost first, and after-hooks run in the same appended order;
//!   there is no reversal on the way out.

use std::rc::Rc;

use crate::diagnostics::KoanError;
use crate::format::Formatter;
use crate::spec::example::Example;

pub mod example;
pub mod expectation;

/// Deferred definition body: registers children/examples/hooks into the
/// node, exactly once.
pub type SpecBody = Box<dyn FnOnce(&mut Spec)>;

/// A hook action. Hooks are shared `Fn` closures because a spec may be
/// re-run; per-run state belongs in cells owned by the test code.
pub type HookAction = Rc<dyn Fn()>;

/// When a hook fires relative to its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTiming {
    Before,
    After,
}

pub struct Hook {
    timing: HookTiming,
    action: HookAction,
}

/// Passed/failed counts aggregated up the tree during a run.
type Counts = (usize, usize);

/// A named node in the test hierarchy.
pub struct Spec {
    name: String,
    path: String,
    body: Option<SpecBody>,
    defined: bool,
    children: Vec<Spec>,
    examples: Vec<Example>,
    spec_hooks: Vec<Hook>,
    example_hooks: Vec<Hook>,
    runs: u32,
    marked: bool,
    has_marked_descendants: bool,
}

impl Spec {
    /// Creates a standalone root spec. The definition body stays
    /// unevaluated until the node is first run or searched.
    pub fn new(name: impl Into<String>, body: impl FnOnce(&mut Spec) + 'static) -> Self {
        let name = name.into();
        let path = name.clone();
        Self::with_path(name, path, Box::new(body))
    }

    pub(crate) fn with_path(name: String, path: String, body: SpecBody) -> Self {
        Self {
            name,
            path,
            body: Some(body),
            defined: false,
            children: Vec::new(),
            examples: Vec::new(),
            spec_hooks: Vec::new(),
            example_hooks: Vec::new(),
            runs: 0,
            marked: false,
            has_marked_descendants: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Space-joined ancestor names from the root down to this node.
    pub fn full_path(&self) -> &str {
        &self.path
    }

    /// How many times this node has been executed.
    pub fn run_count(&self) -> u32 {
        self.runs
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn has_marked_descendants(&self) -> bool {
        self.has_marked_descendants
    }

    pub(crate) fn mark(&mut self) {
        self.marked = true;
    }

    // ------------------------------------------------------------------
    // Registration API (called from definition bodies)
    // ------------------------------------------------------------------

    /// Registers a nested spec. Its definition body stays unevaluated
    /// until the child is first run or searched.
    pub fn context(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Spec) + 'static) {
        let name = name.into();
        let path = format!("{} {}", self.path, name);
        self.children.push(Spec::with_path(name, path, Box::new(body)));
    }

    /// Alias for [`Spec::context`].
    pub fn describe(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Spec) + 'static) {
        self.context(name, body);
    }

    /// Registers an example. The body receives a handle to the example
    /// for cleanup registration.
    #[track_caller]
    pub fn it(&mut self, name: impl Into<String>, body: impl Fn(&mut Example) + 'static) {
        let name = name.into();
        let path = format!("{} {}", self.path, name);
        let source_file = std::panic::Location::caller().file();
        self.examples
            .push(Example::new(name, path, source_file, Rc::new(body)));
    }

    /// Runs once before this node's children and examples. Not inherited
    /// by child specs.
    pub fn before_all(&mut self, action: impl Fn() + 'static) {
        self.spec_hooks.push(Hook {
            timing: HookTiming::Before,
            action: Rc::new(action),
        });
    }

    /// Runs once after this node's children and examples. Not inherited
    /// by child specs.
    pub fn after_all(&mut self, action: impl Fn() + 'static) {
        self.spec_hooks.push(Hook {
            timing: HookTiming::After,
            action: Rc::new(action),
        });
    }

    /// Runs before every example in this subtree, after any ancestor
    /// before-each hooks.
    pub fn before_each(&mut self, action: impl Fn() + 'static) {
        self.example_hooks.push(Hook {
            timing: HookTiming::Before,
            action: Rc::new(action),
        });
    }

    /// Runs after every example in this subtree, in the same
    /// ancestors-first order as before-each (no reversal).
    pub fn after_each(&mut self, action: impl Fn() + 'static) {
        self.example_hooks.push(Hook {
            timing: HookTiming::After,
            action: Rc::new(action),
        });
    }

    // ------------------------------------------------------------------
    // Population
    // ------------------------------------------------------------------

    /// Invokes the deferred definition body if it has not run yet.
    /// Idempotent: a populated node is left untouched.
    pub fn define_children(&mut self) {
        if self.defined {
            return;
        }
        if let Some(body) = self.body.take() {
            body(self);
        }
        self.defined = true;
    }

    /// Number of direct children, populating first.
    pub fn child_count(&mut self) -> usize {
        self.define_children();
        self.children.len()
    }

    /// Number of direct examples, populating first.
    pub fn example_count(&mut self) -> usize {
        self.define_children();
        self.examples.len()
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Runs the whole subtree: enter event, own before-all hooks, child
    /// specs in order, then own examples in order (each wrapped in the
    /// inherited example-hook chain), own after-all hooks, leave event.
    pub fn run(&mut self, formatter: &mut dyn Formatter, has_next: bool) -> (usize, usize) {
        self.run_with_hooks(formatter, has_next, &[])
    }

    pub(crate) fn run_with_hooks(
        &mut self,
        formatter: &mut dyn Formatter,
        has_next: bool,
        inherited: &[&[Hook]],
    ) -> Counts {
        self.define_children();

        formatter.on_enter_spec(self);
        run_own_hooks(&self.spec_hooks, HookTiming::Before);

        let mut passed = 0;
        let mut failed = 0;
        {
            let Spec {
                children,
                examples,
                example_hooks,
                ..
            } = self;

            let mut chain: Vec<&[Hook]> = inherited.to_vec();
            chain.push(example_hooks.as_slice());

            let child_count = children.len();
            let example_count = examples.len();
            for (index, child) in children.iter_mut().enumerate() {
                let next = index + 1 < child_count || example_count > 0;
                let (p, f) = child.run_with_hooks(formatter, next, &chain);
                passed += p;
                failed += f;
            }
            for (index, example) in examples.iter_mut().enumerate() {
                run_chain_hooks(&chain, HookTiming::Before);
                let ok = example.run(formatter, index + 1 < example_count);
                run_chain_hooks(&chain, HookTiming::After);
                if ok {
                    passed += 1;
                } else {
                    failed += 1;
                }
            }
        }

        run_own_hooks(&self.spec_hooks, HookTiming::After);
        formatter.on_leave_spec(self, has_next);
        self.runs += 1;
        (passed, failed)
    }

    /// Selective execution. A marked node runs exactly like [`Spec::run`]
    /// (everything beneath it). A node with marked descendants prunes its
    /// child list to the children on marked paths and recurses into the
    /// survivors without emitting events of its own. An unmarked node
    /// with no marked descendants does nothing.
    pub fn run_marked_only(
        &mut self,
        formatter: &mut dyn Formatter,
        has_next: bool,
    ) -> (usize, usize) {
        self.run_marked_with_hooks(formatter, has_next, &[])
    }

    pub(crate) fn run_marked_with_hooks(
        &mut self,
        formatter: &mut dyn Formatter,
        has_next: bool,
        inherited: &[&[Hook]],
    ) -> Counts {
        if self.marked {
            return self.run_with_hooks(formatter, has_next, inherited);
        }
        if !self.has_marked_descendants {
            return (0, 0);
        }

        // Marking populated this node on the way down; descendants off
        // the marked paths stay unpopulated.
        debug_assert!(self.defined);
        self.children
            .retain(|child| child.marked || child.has_marked_descendants);

        let Spec {
            children,
            example_hooks,
            ..
        } = self;
        let mut chain: Vec<&[Hook]> = inherited.to_vec();
        chain.push(example_hooks.as_slice());

        let mut passed = 0;
        let mut failed = 0;
        let survivor_count = children.len();
        for (index, child) in children.iter_mut().enumerate() {
            let (p, f) =
                child.run_marked_with_hooks(formatter, index + 1 < survivor_count, &chain);
            passed += p;
            failed += f;
        }
        (passed, failed)
    }

    // ------------------------------------------------------------------
    // Name-path lookup
    // ------------------------------------------------------------------

    /// Resolves the remaining slash-delimited segments against this
    /// node's (lazily populated) subtree and marks the target. The first
    /// child whose name matches a segment exactly wins; ambiguous names
    /// are not disambiguated. Every node on a successful resolution path
    /// gains the marked-descendant flag.
    pub(crate) fn mark_path(&mut self, segments: &[&str], full_path: &str) -> Result<(), KoanError> {
        let (first, rest) = match segments.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        self.define_children();
        let child = self
            .children
            .iter_mut()
            .find(|child| child.name == *first)
            .ok_or_else(|| KoanError::lookup(full_path, *first))?;
        if rest.is_empty() {
            child.marked = true;
        } else {
            child.mark_path(rest, full_path)?;
        }
        self.has_marked_descendants = true;
        Ok(())
    }
}

fn run_own_hooks(hooks: &[Hook], timing: HookTiming) {
    for hook in hooks.iter().filter(|hook| hook.timing == timing) {
        (*hook.action)();
    }
}

/// Runs the inherited example-hook chain, outermost ancestor first, each
/// scope's hooks in registration order.
fn run_chain_hooks(chain: &[&[Hook]], timing: HookTiming) {
    for hooks in chain {
        run_own_hooks(hooks, timing);
    }
}
