//! Error types for the chainflow framework.
//!
//! Business failure is not an error here: it travels by value through the
//! result cell as a non-zero status code. `FlowError` covers usage and
//! configuration faults only.

use thiserror::Error;

/// The main error type for chainflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The result cell was read before it held a value.
    ///
    /// The driver always seeds the cell with the starting outcome, so this
    /// only surfaces when a cell constructed with [`ResultCell::unset`] is
    /// read directly.
    ///
    /// [`ResultCell::unset`]: crate::cell::ResultCell::unset
    #[error("result cell accessed before it was initialized")]
    UninitializedResult,

    /// A node was constructed with a configuration that can never execute
    /// meaningfully (for example an empty action list).
    #[error("invalid configuration for node '{label}': {reason}")]
    InvalidNodeConfiguration {
        /// Label of the offending node.
        label: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl FlowError {
    /// Creates an invalid node configuration error.
    #[must_use]
    pub fn invalid_node(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeConfiguration {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
