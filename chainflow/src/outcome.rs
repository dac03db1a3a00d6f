//! The outcome capability trait and a ready-made outcome type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability bound for the value a flow run produces.
///
/// Any caller type can act as an outcome as long as it exposes a status
/// code. A code of `0` means success; any non-zero code aborts the rest of
/// the chain and becomes the run's final value.
///
/// The `Clone` bound exists because the result cell hands out copies rather
/// than references into its lock.
pub trait Outcome: Clone {
    /// Returns the status code carried by this outcome.
    fn status_code(&self) -> i32;

    /// Returns true if the status code signals success.
    fn is_success(&self) -> bool {
        self.status_code() == 0
    }
}

/// A minimal outcome: a status code plus a human-readable message.
///
/// Flows with richer result shapes define their own [`Outcome`] type; this
/// one covers the common "code and reason" case and is what the examples and
/// tests use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The status code; `0` is success.
    pub status_code: i32,
    /// Human-readable context for the code.
    #[serde(default)]
    pub message: String,
}

impl Verdict {
    /// Creates a successful verdict with no message.
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// Creates a failing verdict with the given code and message.
    #[must_use]
    pub fn fail(status_code: i32, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl Outcome for Verdict {
    fn status_code(&self) -> i32 {
        self.status_code
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "status {}", self.status_code)
        } else {
            write!(f, "status {}: {}", self.status_code, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verdict_ok() {
        let v = Verdict::ok();
        assert_eq!(v.status_code(), 0);
        assert!(v.is_success());
    }

    #[test]
    fn test_verdict_fail() {
        let v = Verdict::fail(10_000, "something wrong");
        assert_eq!(v.status_code(), 10_000);
        assert!(!v.is_success());
        assert_eq!(v.message, "something wrong");
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::ok().to_string(), "status 0");
        assert_eq!(Verdict::fail(7, "bad input").to_string(), "status 7: bad input");
    }

    #[test]
    fn test_verdict_serialization() {
        let v = Verdict::fail(42, "denied");
        let json = serde_json::to_string(&v).unwrap();
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn test_custom_outcome_impl() {
        #[derive(Clone)]
        struct ExitCode(i32);

        impl Outcome for ExitCode {
            fn status_code(&self) -> i32 {
                self.0
            }
        }

        assert!(ExitCode(0).is_success());
        assert!(!ExitCode(1).is_success());
    }
}
