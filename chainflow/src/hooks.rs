//! Ready-made node hooks backed by the tracing framework.
//!
//! The node contract only defines hook signatures; these helpers give
//! callers a working pair without wiring their own logging.

use crate::outcome::Outcome;
use std::fmt::Debug;
use tracing::{debug, info, Level};

/// Returns a begin hook that logs the node label and payload.
#[must_use]
pub fn tracing_begin_hook<P: Debug>(level: Level) -> impl Fn(&str, &P) + Send + Sync {
    move |label: &str, payload: &P| match level {
        Level::DEBUG => debug!(node = %label, payload = ?payload, "node started"),
        _ => info!(node = %label, payload = ?payload, "node started"),
    }
}

/// Returns an end hook that logs the node label, payload, and the outcome's
/// status code.
#[must_use]
pub fn tracing_end_hook<P: Debug, R: Outcome>(
    level: Level,
) -> impl Fn(&str, &P, &R) + Send + Sync {
    move |label: &str, payload: &P, outcome: &R| {
        let code = outcome.status_code();
        match level {
            Level::DEBUG => {
                debug!(node = %label, payload = ?payload, code, "node finished");
            }
            _ => {
                info!(node = %label, payload = ?payload, code, "node finished");
            }
        }
    }
}
