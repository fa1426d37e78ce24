//! Scenario assertions
//!
//! Scenarios report the first broken expectation as a [`CheckFailure`]
//! instead of panicking, so the runner can record it and move on to the
//! next case.

use serde::Serialize;
use thiserror::Error;
use varaccess_core::{ErrorKind, Result};

/// Result of a scenario body or a single assertion
pub type CheckResult<T = ()> = std::result::Result<T, CheckFailure>;

/// An expectation a scenario found broken
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckFailure {
    /// A read or witness value differs from the expected one
    #[error("{what}: expected {}, observed {}", hex(.expected), hex(.observed))]
    ValueMismatch {
        /// Label of the failed check
        what: String,
        /// Expected value
        expected: i32,
        /// Observed value
        observed: i32,
    },

    /// A compare-and-set reported the wrong outcome
    #[error("{what}: expected {expected}, observed {observed}")]
    FlagMismatch {
        /// Label of the failed check
        what: String,
        /// Expected success flag
        expected: bool,
        /// Observed success flag
        observed: bool,
    },

    /// A call that must succeed returned an error
    #[error("{what}: unexpected {kind}: {message}")]
    UnexpectedError {
        /// Label of the failed check
        what: String,
        /// Class of the returned error
        kind: ErrorKind,
        /// Rendered error
        message: String,
    },

    /// A call that must fail succeeded
    #[error("{what}: expected {expected}, but the call succeeded")]
    MissingError {
        /// Label of the failed check
        what: String,
        /// Class of the expected error
        expected: ErrorKind,
    },

    /// A call failed with an error of the wrong class
    #[error("{what}: expected {expected}, observed {observed}: {message}")]
    WrongError {
        /// Label of the failed check
        what: String,
        /// Class of the expected error
        expected: ErrorKind,
        /// Class of the returned error
        observed: ErrorKind,
        /// Rendered error
        message: String,
    },

    /// A weak compare-and-set never succeeded within the retry budget
    #[error("{what}: no success in {attempts} attempt(s)")]
    WeakRetryExhausted {
        /// Label of the failed check
        what: String,
        /// Attempts made
        attempts: u32,
    },

    /// A failed access left storage modified
    #[error("{what}: storage changed from {before:?} to {after:?}")]
    StateChanged {
        /// Label of the failed check
        what: String,
        /// Snapshot before the access
        before: Vec<i32>,
        /// Snapshot after the access
        after: Vec<i32>,
    },
}

impl CheckFailure {
    /// Label of the failed check
    pub fn what(&self) -> &str {
        match self {
            CheckFailure::ValueMismatch { what, .. }
            | CheckFailure::FlagMismatch { what, .. }
            | CheckFailure::UnexpectedError { what, .. }
            | CheckFailure::MissingError { what, .. }
            | CheckFailure::WrongError { what, .. }
            | CheckFailure::WeakRetryExhausted { what, .. }
            | CheckFailure::StateChanged { what, .. } => what,
        }
    }
}

fn hex(value: &i32) -> String {
    format!("{:#010X}", *value as u32)
}

/// Converts an operation result into a check result
pub trait Observe<T> {
    /// The success value, or [`CheckFailure::UnexpectedError`] labelled `what`
    fn observe(self, what: &str) -> CheckResult<T>;
}

impl<T> Observe<T> for Result<T> {
    fn observe(self, what: &str) -> CheckResult<T> {
        self.map_err(|e| CheckFailure::UnexpectedError {
            what: what.to_string(),
            kind: e.kind(),
            message: e.to_string(),
        })
    }
}

/// Check an observed value
pub fn check_value(what: &str, observed: i32, expected: i32) -> CheckResult {
    if observed == expected {
        Ok(())
    } else {
        Err(CheckFailure::ValueMismatch {
            what: what.to_string(),
            expected,
            observed,
        })
    }
}

/// Check an observed success flag
pub fn check_flag(what: &str, observed: bool, expected: bool) -> CheckResult {
    if observed == expected {
        Ok(())
    } else {
        Err(CheckFailure::FlagMismatch {
            what: what.to_string(),
            expected,
            observed,
        })
    }
}

/// Check that `result` failed with an error of class `expected`
pub fn expect_error<T>(what: &str, result: Result<T>, expected: ErrorKind) -> CheckResult {
    match result {
        Ok(_) => Err(CheckFailure::MissingError {
            what: what.to_string(),
            expected,
        }),
        Err(e) if e.kind() == expected => Ok(()),
        Err(e) => Err(CheckFailure::WrongError {
            what: what.to_string(),
            expected,
            observed: e.kind(),
            message: e.to_string(),
        }),
    }
}

/// Check that a storage snapshot is unchanged
pub fn check_unchanged(what: &str, before: &[i32], after: Vec<i32>) -> CheckResult {
    if before == after.as_slice() {
        Ok(())
    } else {
        Err(CheckFailure::StateChanged {
            what: what.to_string(),
            before: before.to_vec(),
            after,
        })
    }
}

/// Retry a weak compare-and-set until it reports success
///
/// Spurious failures are tolerated up to `attempts` tries; an error from the
/// operation itself ends the loop immediately.
pub fn retry_weak<F>(what: &str, attempts: u32, mut op: F) -> CheckResult
where
    F: FnMut() -> Result<bool>,
{
    for _ in 0..attempts {
        if op().observe(what)? {
            return Ok(());
        }
    }
    Err(CheckFailure::WeakRetryExhausted {
        what: what.to_string(),
        attempts,
    })
}
