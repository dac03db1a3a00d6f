//! Flow chains: nodes, the sequential driver, and the fluent builder.

mod builder;
mod chain;
mod node;


pub use builder::{BranchBuilder, FlowBuilder};
pub use chain::Flow;
pub use node::{action, Action, BeginHook, EndHook, FlowNode, NodeKind, Predicate};
