//! # Chainflow
//!
//! A sequential task-flow primitive: typed flow nodes chained against one
//! shared result cell, with automatic short-circuit on failure and
//! mutually-exclusive if / else-if / else branching.
//!
//! - **Uniform node lifecycle**: skip gate → status gate → begin hook →
//!   body → commit → end hook
//! - **Railway-style failure**: a non-zero status code halts the rest of the
//!   chain and becomes the run's final outcome
//! - **Exclusive branching**: a fired branch skip-marks its sibling
//!   else-if/else nodes for the remainder of the run
//! - **Fail-fast construction**: invalid node configurations are rejected by
//!   the builder, never mid-run
//!
//! ## Quick Start
//!
//! ```rust
//! use chainflow::prelude::*;
//!
//! let mut flow = FlowBuilder::<u32, Verdict>::new("age-check")
//!     .step("audit", |_age| None)
//!     .when("adult", |age| *age >= 18, vec![action(|_: &u32| Some(Verdict::ok()))])?
//!     .otherwise("minor", vec![action(|_: &u32| Some(Verdict::fail(403, "too young")))])?
//!     .build()?;
//!
//! let outcome = flow.run(&17, Verdict::ok())?;
//! assert_eq!(outcome.status_code, 403);
//! # Ok::<(), chainflow::FlowError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cell;
pub mod errors;
pub mod flow;
pub mod hooks;
pub mod outcome;

pub use errors::FlowError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cell::ResultCell;
    pub use crate::errors::FlowError;
    pub use crate::flow::{
        action, Action, BranchBuilder, Flow, FlowBuilder, FlowNode, NodeKind, Predicate,
    };
    pub use crate::hooks::{tracing_begin_hook, tracing_end_hook};
    pub use crate::outcome::{Outcome, Verdict};
}
