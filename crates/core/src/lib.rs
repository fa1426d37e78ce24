//! Core types for variable handles
//!
//! This crate defines the vocabulary shared by storage, handles and the
//! conformance harness:
//! - AccessMode: the named operations, with family, kind and operand shape
//! - CoordinateShape / Mutability / VarType: the addressing model
//! - AccessModeSet + capability table: which modes a location supports
//! - OrderingContract: the atomic orderings each mode is implemented with
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access_mode;
pub mod capability;
pub mod coordinate;
pub mod error;
pub mod ordering;

pub use access_mode::{AccessFamily, AccessKind, AccessMode, ReturnKind};
pub use capability::{is_supported, supported, unsupported, AccessModeSet};
pub use coordinate::{CoordinateShape, CoordinateType, Mutability, VarType};
pub use error::{Error, ErrorKind, Result};
pub use ordering::{
    contract, happens_before, AccessOrdering, OrderingContract, RmwOrdering, Visibility,
};
