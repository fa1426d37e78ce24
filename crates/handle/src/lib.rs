//! Variable handles over fields and array elements
//!
//! This crate implements the handle layer with:
//! - VarHandle: typed accessor exposing every access mode
//! - Lookup: binds instance fields, static fields and array elements
//! - Coordinate / AccessOutcome: runtime coordinates and dynamic results
//!
//! Capability, operand, coordinate and bounds checks all run before a cell is
//! touched, so a failed operation never leaves storage partially updated.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cell;
pub mod coordinate;
pub mod handle;
pub mod lookup;

pub use coordinate::{element, no_coords, receiver, AccessOutcome, Coordinate};
pub use handle::VarHandle;
pub use lookup::Lookup;
