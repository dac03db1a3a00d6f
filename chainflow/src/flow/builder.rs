//! Fluent flow construction with fail-fast validation.
//!
//! The builder is two-state: [`FlowBuilder`] accepts ordinary chain
//! operations, and [`when`](FlowBuilder::when) switches to a
//! [`BranchBuilder`] that additionally offers `else_when`/`otherwise`. Any
//! non-branch operation closes the open conditional group, so a dangling
//! `ElseIf` after an `Else` is unrepresentable.

use super::chain::Flow;
use super::node::{Action, BeginHook, EndHook, FlowNode, NodeKind};
use crate::errors::FlowError;
use crate::outcome::Outcome;
use std::fmt;
use std::sync::Arc;

/// Builder for assembling a [`Flow`].
pub struct FlowBuilder<P, R> {
    name: String,
    nodes: Vec<FlowNode<P, R>>,
    default_begin: Option<BeginHook<P>>,
    default_end: Option<EndHook<P, R>>,
}

impl<P, R> fmt::Debug for FlowBuilder<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowBuilder")
            .field("name", &self.name)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<P, R: Outcome> FlowBuilder<P, R> {
    /// Creates a new builder for a flow with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            default_begin: None,
            default_end: None,
        }
    }

    /// Sets the flow-level begin hook, applied to every node without one of
    /// its own.
    #[must_use]
    pub fn on_begin(mut self, hook: impl Fn(&str, &P) + Send + Sync + 'static) -> Self {
        self.default_begin = Some(Arc::new(hook));
        self
    }

    /// Sets the flow-level end hook, applied to every node without one of
    /// its own.
    #[must_use]
    pub fn on_end(mut self, hook: impl Fn(&str, &P, &R) + Send + Sync + 'static) -> Self {
        self.default_end = Some(Arc::new(hook));
        self
    }

    /// Appends a normal node with a single body callable.
    #[must_use]
    pub fn step(
        mut self,
        label: impl Into<String>,
        body: impl Fn(&P) -> Option<R> + Send + Sync + 'static,
    ) -> Self {
        self.nodes.push(FlowNode::task(label, Box::new(body)));
        self
    }

    /// Appends a loop node that runs `actions` in order, `times` times.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if `actions` is empty
    /// or `times` is zero.
    pub fn repeat(
        mut self,
        label: impl Into<String>,
        times: usize,
        actions: Vec<Action<P, R>>,
    ) -> Result<Self, FlowError> {
        let label = label.into();
        if actions.is_empty() {
            return Err(FlowError::invalid_node(label, "action list is empty"));
        }
        if times == 0 {
            return Err(FlowError::invalid_node(label, "loop count is zero"));
        }
        self.nodes.push(FlowNode::repeat(label, times, actions));
        Ok(self)
    }

    /// Appends an `If` node and opens a conditional group.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if `actions` is empty.
    pub fn when(
        mut self,
        label: impl Into<String>,
        condition: impl Fn(&P) -> bool + Send + Sync + 'static,
        actions: Vec<Action<P, R>>,
    ) -> Result<BranchBuilder<P, R>, FlowError> {
        let label = label.into();
        if actions.is_empty() {
            return Err(FlowError::invalid_node(label, "action list is empty"));
        }
        self.nodes.push(FlowNode::branch(
            NodeKind::If,
            label,
            Some(Box::new(condition)),
            actions,
        ));
        Ok(BranchBuilder { inner: self })
    }

    /// Attaches a begin hook to the most recently added node.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if no node has been
    /// added yet.
    pub fn with_begin_hook(
        mut self,
        hook: impl Fn(&str, &P) + Send + Sync + 'static,
    ) -> Result<Self, FlowError> {
        match self.nodes.last_mut() {
            Some(node) => {
                node.set_begin_hook(Arc::new(hook));
                Ok(self)
            }
            None => Err(FlowError::invalid_node(
                self.name.clone(),
                "no node to attach a begin hook to",
            )),
        }
    }

    /// Attaches an end hook to the most recently added node.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if no node has been
    /// added yet.
    pub fn with_end_hook(
        mut self,
        hook: impl Fn(&str, &P, &R) + Send + Sync + 'static,
    ) -> Result<Self, FlowError> {
        match self.nodes.last_mut() {
            Some(node) => {
                node.set_end_hook(Arc::new(hook));
                Ok(self)
            }
            None => Err(FlowError::invalid_node(
                self.name.clone(),
                "no node to attach an end hook to",
            )),
        }
    }

    /// Returns the number of nodes added so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Builds the flow.
    ///
    /// Flow-level default hooks are applied here to every node that has no
    /// hook of its own.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if the builder holds
    /// no nodes.
    pub fn build(mut self) -> Result<Flow<P, R>, FlowError> {
        if self.nodes.is_empty() {
            return Err(FlowError::invalid_node(self.name.clone(), "flow has no nodes"));
        }

        for node in &mut self.nodes {
            if let Some(hook) = &self.default_begin {
                if !node.has_begin_hook() {
                    node.set_begin_hook(Arc::clone(hook));
                }
            }
            if let Some(hook) = &self.default_end {
                if !node.has_end_hook() {
                    node.set_end_hook(Arc::clone(hook));
                }
            }
        }

        Ok(Flow::new(self.name, self.nodes))
    }
}

/// Builder state with an open conditional group.
///
/// Produced by [`FlowBuilder::when`]; offers `else_when`/`otherwise` in
/// addition to the ordinary chain operations, which close the group.
pub struct BranchBuilder<P, R> {
    inner: FlowBuilder<P, R>,
}

impl<P, R> fmt::Debug for BranchBuilder<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BranchBuilder")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<P, R: Outcome> BranchBuilder<P, R> {
    /// Appends an `ElseIf` node to the open group.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if `actions` is empty.
    pub fn else_when(
        mut self,
        label: impl Into<String>,
        condition: impl Fn(&P) -> bool + Send + Sync + 'static,
        actions: Vec<Action<P, R>>,
    ) -> Result<Self, FlowError> {
        let label = label.into();
        if actions.is_empty() {
            return Err(FlowError::invalid_node(label, "action list is empty"));
        }
        self.inner.nodes.push(FlowNode::branch(
            NodeKind::ElseIf,
            label,
            Some(Box::new(condition)),
            actions,
        ));
        Ok(self)
    }

    /// Appends the `Else` node and closes the group.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidNodeConfiguration`] if `actions` is empty.
    pub fn otherwise(
        mut self,
        label: impl Into<String>,
        actions: Vec<Action<P, R>>,
    ) -> Result<FlowBuilder<P, R>, FlowError> {
        let label = label.into();
        if actions.is_empty() {
            return Err(FlowError::invalid_node(label, "action list is empty"));
        }
        self.inner
            .nodes
            .push(FlowNode::branch(NodeKind::Else, label, None, actions));
        Ok(self.inner)
    }

    /// Closes the group and appends a normal node.
    #[must_use]
    pub fn step(
        self,
        label: impl Into<String>,
        body: impl Fn(&P) -> Option<R> + Send + Sync + 'static,
    ) -> FlowBuilder<P, R> {
        self.inner.step(label, body)
    }

    /// Closes the group and appends a loop node.
    ///
    /// # Errors
    ///
    /// See [`FlowBuilder::repeat`].
    pub fn repeat(
        self,
        label: impl Into<String>,
        times: usize,
        actions: Vec<Action<P, R>>,
    ) -> Result<FlowBuilder<P, R>, FlowError> {
        self.inner.repeat(label, times, actions)
    }

    /// Closes the group and opens a new one with an `If` node.
    ///
    /// # Errors
    ///
    /// See [`FlowBuilder::when`].
    pub fn when(
        self,
        label: impl Into<String>,
        condition: impl Fn(&P) -> bool + Send + Sync + 'static,
        actions: Vec<Action<P, R>>,
    ) -> Result<Self, FlowError> {
        self.inner.when(label, condition, actions)
    }

    /// Attaches a begin hook to the most recently added branch node.
    ///
    /// # Errors
    ///
    /// See [`FlowBuilder::with_begin_hook`].
    pub fn with_begin_hook(
        mut self,
        hook: impl Fn(&str, &P) + Send + Sync + 'static,
    ) -> Result<Self, FlowError> {
        self.inner = self.inner.with_begin_hook(hook)?;
        Ok(self)
    }

    /// Attaches an end hook to the most recently added branch node.
    ///
    /// # Errors
    ///
    /// See [`FlowBuilder::with_end_hook`].
    pub fn with_end_hook(
        mut self,
        hook: impl Fn(&str, &P, &R) + Send + Sync + 'static,
    ) -> Result<Self, FlowError> {
        self.inner = self.inner.with_end_hook(hook)?;
        Ok(self)
    }

    /// Builds the flow, closing the open group.
    ///
    /// # Errors
    ///
    /// See [`FlowBuilder::build`].
    pub fn build(self) -> Result<Flow<P, R>, FlowError> {
        self.inner.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::node::action;
    use crate::outcome::Verdict;
    use pretty_assertions::assert_eq;

    fn noop() -> Action<(), Verdict> {
        action(|_: &()| Some(Verdict::ok()))
    }

    #[test]
    fn test_builder_counts_nodes() {
        let builder = FlowBuilder::<(), Verdict>::new("counting")
            .step("one", |_| None)
            .step("two", |_| None);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_builder_records_kinds_in_chain_order() {
        let flow = FlowBuilder::<(), Verdict>::new("kinds")
            .step("normal", |_| None)
            .when("if", |_| true, vec![noop()])
            .unwrap()
            .else_when("elseif", |_| true, vec![noop()])
            .unwrap()
            .otherwise("else", vec![noop()])
            .unwrap()
            .repeat("loop", 2, vec![noop()])
            .unwrap()
            .build()
            .unwrap();

        let kinds: Vec<NodeKind> = flow.nodes().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Normal,
                NodeKind::If,
                NodeKind::ElseIf,
                NodeKind::Else,
                NodeKind::Loop,
            ]
        );
    }

    #[test]
    fn test_empty_action_list_rejected() {
        let err = FlowBuilder::<(), Verdict>::new("bad")
            .when("empty-if", |_| true, Vec::new())
            .unwrap_err();
        assert_eq!(
            err,
            FlowError::invalid_node("empty-if", "action list is empty")
        );

        let err = FlowBuilder::<(), Verdict>::new("bad")
            .when("if", |_| true, vec![noop()])
            .unwrap()
            .otherwise("empty-else", Vec::new())
            .unwrap_err();
        assert_eq!(
            err,
            FlowError::invalid_node("empty-else", "action list is empty")
        );
    }

    #[test]
    fn test_zero_loop_count_rejected() {
        let err = FlowBuilder::<(), Verdict>::new("bad")
            .repeat("noop-loop", 0, vec![noop()])
            .unwrap_err();
        assert_eq!(err, FlowError::invalid_node("noop-loop", "loop count is zero"));
    }

    #[test]
    fn test_empty_flow_rejected() {
        let err = FlowBuilder::<(), Verdict>::new("empty").build().unwrap_err();
        assert_eq!(err, FlowError::invalid_node("empty", "flow has no nodes"));
    }

    #[test]
    fn test_hook_without_node_rejected() {
        let err = FlowBuilder::<(), Verdict>::new("hookless")
            .with_begin_hook(|_, _| {})
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidNodeConfiguration { .. }));
    }
}
