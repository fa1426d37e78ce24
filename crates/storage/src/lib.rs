//! Storage for variable handles
//!
//! This crate owns the memory handles read and write through:
//! - ClassDef: field declarations plus static-field storage
//! - Instance: one object's instance-field storage
//! - IntArray: fixed-length shared `int` arrays
//!
//! Handles never allocate or free storage; they only resolve cells in it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod instance;
pub mod layout;

pub use array::IntArray;
pub use instance::Instance;
pub use layout::{ClassBuilder, ClassDef, ClassId, FieldDecl, FieldRef, FieldScope};
