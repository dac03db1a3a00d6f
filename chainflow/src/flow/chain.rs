//! The sequential chain driver.

use super::node::FlowNode;
use crate::cell::ResultCell;
use crate::errors::FlowError;
use crate::outcome::Outcome;
use std::fmt;
use tracing::debug;

/// An assembled chain of flow nodes.
///
/// The flow owns the node arena; nodes execute in exactly the order they
/// were chained. All branch exclusivity lives inside the nodes themselves —
/// the driver only walks.
///
/// A flow is reusable: every [`run`](Self::run) starts from a clean slate
/// (skip flags cleared, a fresh result cell seeded with the starting
/// outcome).
pub struct Flow<P, R> {
    name: String,
    nodes: Vec<FlowNode<P, R>>,
}

impl<P, R> fmt::Debug for Flow<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("name", &self.name)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<P, R> Flow<P, R> {
    pub(crate) fn new(name: String, nodes: Vec<FlowNode<P, R>>) -> Self {
        Self { name, nodes }
    }

    /// Returns the flow name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of nodes in the chain.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node arena, in chain order.
    #[must_use]
    pub fn nodes(&self) -> &[FlowNode<P, R>] {
        &self.nodes
    }

    /// Clears every node's skip flag.
    ///
    /// [`run`](Self::run) calls this on entry; it is public for callers that
    /// want to inspect node state between runs.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.clear_skip();
        }
    }
}

impl<P, R: Outcome> Flow<P, R> {
    /// Runs the chain against `payload`, starting from `initial`.
    ///
    /// Returns the final outcome held by the result cell: either the last
    /// committed value, or `initial` unchanged if no node wrote anything.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UninitializedResult`] only on cell misuse, which
    /// the driver itself cannot produce; the variant exists for direct cell
    /// users.
    pub fn run(&mut self, payload: &P, initial: R) -> Result<R, FlowError> {
        self.reset();
        let cell = ResultCell::new(initial);
        debug!(flow = %self.name, nodes = self.nodes.len(), "flow run started");

        let mut index = 0;
        while let Some((current, rest)) = self.nodes[index..].split_first_mut() {
            current.run(payload, &cell, rest)?;
            index += 1;
        }

        let outcome = cell.get()?;
        debug!(
            flow = %self.name,
            code = outcome.status_code(),
            "flow run finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::node::action;
    use crate::flow::FlowBuilder;
    use crate::outcome::Verdict;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_all_successful_nodes_run_in_order() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let mut builder = FlowBuilder::<(), Verdict>::new("ordered");
        for name in ["first", "second", "third"] {
            let log = Arc::clone(&order);
            builder = builder.step(name, move |_| {
                log.lock().push(name);
                Some(Verdict::ok())
            });
        }

        let mut flow = builder.build().unwrap();
        let out = flow.run(&(), Verdict::ok()).unwrap();

        assert!(out.is_success());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failure_halts_remaining_nodes() {
        let later = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later);

        let mut flow = FlowBuilder::<(), Verdict>::new("halting")
            .step("ok", |_| Some(Verdict::ok()))
            .step("boom", |_| Some(Verdict::fail(10_000, "something wrong")))
            .step("never", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(Verdict::ok())
            })
            .build()
            .unwrap();

        let out = flow.run(&(), Verdict::ok()).unwrap();

        assert_eq!(out, Verdict::fail(10_000, "something wrong"));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_body_flow_returns_initial() {
        let mut flow = FlowBuilder::<(), Verdict>::new("pass-through")
            .step("observer", |_| None)
            .build()
            .unwrap();

        let out = flow.run(&(), Verdict::fail(0, "seed")).unwrap();
        assert_eq!(out, Verdict::fail(0, "seed"));
    }

    #[test]
    fn test_flow_is_reusable_across_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let mut flow = FlowBuilder::<bool, Verdict>::new("reusable")
            .when(
                "gate",
                |flag: &bool| *flag,
                vec![action(move |_: &bool| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some(Verdict::ok())
                })],
            )
            .unwrap()
            .otherwise("fallback", vec![action(|_: &bool| Some(Verdict::ok()))])
            .unwrap()
            .build()
            .unwrap();

        flow.run(&true, Verdict::ok()).unwrap();
        flow.run(&true, Verdict::ok()).unwrap();

        // Both runs fire the If branch; skip marks from run one do not leak
        // into run two.
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(flow.nodes().iter().any(|n| n.is_skipped()));

        flow.reset();
        assert!(flow.nodes().iter().all(|n| !n.is_skipped()));
    }
}
