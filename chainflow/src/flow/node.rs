//! Flow nodes and the node execution lifecycle.

use crate::cell::ResultCell;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The kind of a flow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// An unconditional step.
    Normal,
    /// The head of a conditional group.
    If,
    /// A follow-up branch, tried when no earlier member of the group fired.
    ElseIf,
    /// The fallback branch of a conditional group.
    Else,
    /// A step whose actions run a fixed number of times.
    Loop,
    /// Reserved for a future concurrent node; the sequential driver never
    /// produces it.
    Parallel,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::If => write!(f, "if"),
            Self::ElseIf => write!(f, "else_if"),
            Self::Else => write!(f, "else"),
            Self::Loop => write!(f, "loop"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

impl NodeKind {
    /// Returns true for the branch kinds a fired branch marks as skipped.
    #[must_use]
    pub fn is_branch_follower(&self) -> bool {
        matches!(self, Self::ElseIf | Self::Else)
    }
}

/// A node body or branch action: takes the payload, optionally produces a
/// new outcome.
pub type Action<P, R> = Box<dyn Fn(&P) -> Option<R> + Send + Sync>;

/// A branch predicate.
pub type Predicate<P> = Box<dyn Fn(&P) -> bool + Send + Sync>;

/// Hook invoked before a node's body runs.
pub type BeginHook<P> = Arc<dyn Fn(&str, &P) + Send + Sync>;

/// Hook invoked after a node's body ran, with the committed outcome.
pub type EndHook<P, R> = Arc<dyn Fn(&str, &P, &R) + Send + Sync>;

/// Boxes a closure into an [`Action`].
///
/// Convenience for building branch and loop action lists without spelling
/// out the trait-object cast.
pub fn action<P, R>(f: impl Fn(&P) -> Option<R> + Send + Sync + 'static) -> Action<P, R> {
    Box::new(f)
}

pub(crate) enum NodeBody<P, R> {
    /// Single body callable, run once.
    Task(Action<P, R>),
    /// Conditional branch: predicate (absent for Else) plus its actions.
    Branch {
        condition: Option<Predicate<P>>,
        actions: Vec<Action<P, R>>,
    },
    /// Fixed-count repetition of an action list.
    Repeat {
        times: usize,
        actions: Vec<Action<P, R>>,
    },
}

/// One executable step in a flow chain.
///
/// Nodes live in an arena owned by the [`Flow`](crate::flow::Flow); the
/// "next" relation is positional. A node is gated by its `skip` flag and by
/// the shared cell's status code, and carries optional begin/end hooks.
pub struct FlowNode<P, R> {
    kind: NodeKind,
    label: String,
    skip: bool,
    begin_hook: Option<BeginHook<P>>,
    end_hook: Option<EndHook<P, R>>,
    body: NodeBody<P, R>,
}

impl<P, R> fmt::Debug for FlowNode<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowNode")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

impl<P, R> FlowNode<P, R> {
    pub(crate) fn task(label: impl Into<String>, body: Action<P, R>) -> Self {
        Self {
            kind: NodeKind::Normal,
            label: label.into(),
            skip: false,
            begin_hook: None,
            end_hook: None,
            body: NodeBody::Task(body),
        }
    }

    pub(crate) fn branch(
        kind: NodeKind,
        label: impl Into<String>,
        condition: Option<Predicate<P>>,
        actions: Vec<Action<P, R>>,
    ) -> Self {
        debug_assert!(matches!(
            kind,
            NodeKind::If | NodeKind::ElseIf | NodeKind::Else
        ));
        Self {
            kind,
            label: label.into(),
            skip: false,
            begin_hook: None,
            end_hook: None,
            body: NodeBody::Branch { condition, actions },
        }
    }

    pub(crate) fn repeat(
        label: impl Into<String>,
        times: usize,
        actions: Vec<Action<P, R>>,
    ) -> Self {
        Self {
            kind: NodeKind::Loop,
            label: label.into(),
            skip: false,
            begin_hook: None,
            end_hook: None,
            body: NodeBody::Repeat { times, actions },
        }
    }

    /// Returns the node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the node's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if the node has been skip-marked for the current run.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub(crate) fn set_begin_hook(&mut self, hook: BeginHook<P>) {
        self.begin_hook = Some(hook);
    }

    pub(crate) fn set_end_hook(&mut self, hook: EndHook<P, R>) {
        self.end_hook = Some(hook);
    }

    pub(crate) fn has_begin_hook(&self) -> bool {
        self.begin_hook.is_some()
    }

    pub(crate) fn has_end_hook(&self) -> bool {
        self.end_hook.is_some()
    }

    pub(crate) fn clear_skip(&mut self) {
        self.skip = false;
    }
}

impl<P, R: Outcome> FlowNode<P, R> {
    /// Executes this node against the shared cell.
    ///
    /// `rest` is the arena tail immediately following this node; a fired
    /// branch uses it to skip-mark its sibling branches.
    pub(crate) fn run(
        &mut self,
        payload: &P,
        cell: &ResultCell<R>,
        rest: &mut [FlowNode<P, R>],
    ) -> Result<(), crate::errors::FlowError> {
        if self.skip {
            trace!(node = %self.label, kind = %self.kind, "node skip-marked, bypassing");
            return Ok(());
        }
        if !cell.get()?.is_success() {
            trace!(node = %self.label, kind = %self.kind, "chain short-circuited, bypassing");
            return Ok(());
        }

        match &self.body {
            NodeBody::Task(body) => {
                self.fire_begin(payload);
                if let Some(outcome) = body(payload) {
                    cell.set(outcome);
                }
                self.fire_end(payload, cell)?;
            }
            NodeBody::Repeat { times, actions } => {
                self.fire_begin(payload);
                'iterations: for _ in 0..*times {
                    for act in actions {
                        if let Some(outcome) = act(payload) {
                            if !outcome.is_success() {
                                debug!(
                                    node = %self.label,
                                    code = outcome.status_code(),
                                    "loop aborted on failing outcome"
                                );
                                cell.set(outcome);
                                break 'iterations;
                            }
                        }
                    }
                }
                self.fire_end(payload, cell)?;
            }
            NodeBody::Branch { condition, actions } => {
                if let Some(cond) = condition {
                    if !cond(payload) {
                        trace!(node = %self.label, kind = %self.kind, "predicate false, branch not fired");
                        return Ok(());
                    }
                }

                self.fire_begin(payload);

                let mut halted = None;
                for act in actions {
                    if let Some(outcome) = act(payload) {
                        if !outcome.is_success() {
                            halted = Some(outcome);
                            break;
                        }
                    }
                }

                if let Some(outcome) = halted {
                    debug!(
                        node = %self.label,
                        code = outcome.status_code(),
                        "branch short-circuited"
                    );
                    cell.set(outcome);
                } else {
                    // Branch exclusivity: the fired member marks every
                    // immediately-following ElseIf/Else as skipped, stopping
                    // at the first node of any other kind.
                    for follower in rest.iter_mut() {
                        if !follower.kind.is_branch_follower() {
                            break;
                        }
                        trace!(node = %follower.label, "sibling branch skip-marked");
                        follower.skip = true;
                    }
                }

                self.fire_end(payload, cell)?;
            }
        }

        Ok(())
    }

    fn fire_begin(&self, payload: &P) {
        if let Some(hook) = &self.begin_hook {
            hook(&self.label, payload);
        }
    }

    fn fire_end(&self, payload: &P, cell: &ResultCell<R>) -> Result<(), crate::errors::FlowError> {
        if let Some(hook) = &self.end_hook {
            hook(&self.label, payload, &cell.get()?);
        }
        Ok(())
    }
}
