//! Error types for variable handle access
//!
//! Every failure is a synchronous, typed value returned from the offending
//! call. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! A spurious weak compare-and-set failure is NOT an error: it is reported as
//! an ordinary `false` result and handled by the caller's retry loop.

use crate::access_mode::AccessMode;
use crate::coordinate::{CoordinateShape, Mutability};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for handle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for lookup and access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lookup could not resolve a location of the requested scope and type
    #[error("Binding error: {0}")]
    Binding(String),

    /// The mode is not legal for the handle's mutability
    #[error("Unsupported operation: {mode} on {mutability} {shape}")]
    UnsupportedOperation {
        /// Requested mode
        mode: AccessMode,
        /// Shape of the handle
        shape: CoordinateShape,
        /// Mutability of the handle's location
        mutability: Mutability,
    },

    /// Array index outside `[0, length)`
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds {
        /// Offending index
        index: i32,
        /// Length of the array
        length: usize,
    },

    /// Coordinate or operand count/type mismatch
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// Access mode ordinal or name outside the fixed set
    #[error("Invalid access mode: {0}")]
    InvalidMode(String),
}

/// Discriminant of [`Error`], used to match expected failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// [`Error::Binding`]
    Binding,
    /// [`Error::UnsupportedOperation`]
    UnsupportedOperation,
    /// [`Error::IndexOutOfBounds`]
    IndexOutOfBounds,
    /// [`Error::IllegalArgument`]
    IllegalArgument,
    /// [`Error::InvalidMode`]
    InvalidMode,
}

impl Error {
    /// Create a binding error
    pub fn binding(msg: impl Into<String>) -> Self {
        Error::Binding(msg.into())
    }

    /// Create an illegal-argument error
    pub fn illegal_argument(msg: impl Into<String>) -> Self {
        Error::IllegalArgument(msg.into())
    }

    /// Discriminant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Binding(_) => ErrorKind::Binding,
            Error::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            Error::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Error::IllegalArgument(_) => ErrorKind::IllegalArgument,
            Error::InvalidMode(_) => ErrorKind::InvalidMode,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Binding => "BindingError",
            ErrorKind::UnsupportedOperation => "UnsupportedOperationError",
            ErrorKind::IndexOutOfBounds => "IndexOutOfBoundsError",
            ErrorKind::IllegalArgument => "IllegalArgumentError",
            ErrorKind::InvalidMode => "InvalidModeError",
        };
        write!(f, "{}", name)
    }
}
