//! The shared result cell.

use crate::errors::FlowError;
use crate::outcome::Outcome;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared mutable holder for the current outcome of one flow run.
///
/// Every node in a run holds a clone of the same cell; cloning shares the
/// underlying storage. Writes replace the held value wholesale. Execution is
/// strictly sequential, so the lock never sees contention; it exists so the
/// cell can be handed around freely without aliasing rules getting in the
/// way.
#[derive(Debug, Default)]
pub struct ResultCell<R> {
    inner: Arc<RwLock<Option<R>>>,
}

impl<R> Clone for ResultCell<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Outcome> ResultCell<R> {
    /// Creates a cell holding the given starting outcome.
    #[must_use]
    pub fn new(initial: R) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(initial))),
        }
    }

    /// Creates a cell with no value.
    ///
    /// Reading it before the first [`set`](Self::set) is a usage error.
    #[must_use]
    pub fn unset() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns a copy of the current outcome.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UninitializedResult`] if the cell holds no value.
    pub fn get(&self) -> Result<R, FlowError> {
        self.inner
            .read()
            .clone()
            .ok_or(FlowError::UninitializedResult)
    }

    /// Replaces the held outcome.
    pub fn set(&self, outcome: R) {
        *self.inner.write() = Some(outcome);
    }

    /// Returns true if the cell holds a value.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Verdict;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_get_returns_initial() {
        let cell = ResultCell::new(Verdict::ok());
        assert_eq!(cell.get().unwrap(), Verdict::ok());
    }

    #[test]
    fn test_cell_set_replaces_wholesale() {
        let cell = ResultCell::new(Verdict::ok());
        cell.set(Verdict::fail(5, "halt"));
        assert_eq!(cell.get().unwrap(), Verdict::fail(5, "halt"));
    }

    #[test]
    fn test_unset_cell_is_usage_error() {
        let cell: ResultCell<Verdict> = ResultCell::unset();
        assert!(!cell.is_set());
        assert_eq!(cell.get(), Err(FlowError::UninitializedResult));
    }

    #[test]
    fn test_clones_share_storage() {
        let cell = ResultCell::new(Verdict::ok());
        let alias = cell.clone();
        alias.set(Verdict::fail(1, "seen by both"));
        assert_eq!(cell.get().unwrap().status_code, 1);
    }
}
