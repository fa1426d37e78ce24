//! varaccess - typed access modes over fields and array elements
//!
//! A [`VarHandle`] binds one storage location (an instance field, a static
//! field, or any element of an `int[]`) and exposes nineteen access modes,
//! from plain reads to compare-and-exchange with acquire semantics. Which
//! modes a handle supports depends only on its coordinate shape and whether
//! the location is final.
//!
//! # Quick Start
//!
//! ```
//! use varaccess::{receiver, ClassDef, Instance, Lookup, Mutability, VarType};
//!
//! let class = ClassDef::builder("Point")
//!     .instance_field("x", Mutability::Mutable, 0)
//!     .build()?;
//! let p = Instance::new(&class);
//! let vh = Lookup::new().find_var_handle(&class, "x", VarType::Int)?;
//!
//! vh.set_release(&receiver(&p), 7)?;
//! assert_eq!(vh.get_acquire(&receiver(&p))?, 7);
//! assert!(vh.compare_and_set(&receiver(&p), 7, 8)?);
//! # Ok::<(), varaccess::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `varaccess-core`: access modes, capability table, ordering contracts, errors
//! - `varaccess-storage`: class layouts, instances and arrays of atomic cells
//! - `varaccess-handle`: [`VarHandle`] and [`Lookup`]
//! - `varaccess-harness`: the conformance runner behind `run_access_matrix`

pub use varaccess_core::{
    contract, happens_before, is_supported, supported, unsupported, AccessFamily, AccessKind,
    AccessMode, AccessModeSet, AccessOrdering, CoordinateShape, CoordinateType, Error, ErrorKind,
    Mutability, OrderingContract, Result, ReturnKind, RmwOrdering, VarType, Visibility,
};
pub use varaccess_handle::{
    element, no_coords, receiver, AccessOutcome, Coordinate, Lookup, VarHandle,
};
pub use varaccess_storage::{ClassBuilder, ClassDef, ClassId, FieldDecl, FieldScope, Instance, IntArray};

/// Conformance runner
pub use varaccess_harness as harness;
