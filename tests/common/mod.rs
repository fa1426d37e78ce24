//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::Arc;
pub use varaccess::{
    element, no_coords, receiver, AccessMode, ClassDef, Coordinate, CoordinateShape, ErrorKind,
    Instance, IntArray, Lookup, Mutability, VarHandle, VarType,
};

pub const V1: i32 = 0x01234567;
pub const V2: i32 = 0x89ABCDEFu32 as i32;
pub const V3: i32 = 0xCAFEBABEu32 as i32;

/// Patterns every mutable location must store and load unchanged
pub const BOUNDARY_PATTERNS: [i32; 5] = [0x00000000, V1, V2, V3, -1];

// ============================================================================
// Holder - one class with every field kind
// ============================================================================

/// A fresh class with one field of each kind, a receiver and bound handles.
///
/// Every call defines a new class, so static fields are never shared between
/// tests running in parallel.
pub struct Holder {
    pub class: Arc<ClassDef>,
    pub recv: Instance,
    pub final_field: VarHandle,
    pub field: VarHandle,
    pub static_final_field: VarHandle,
    pub static_field: VarHandle,
    pub array: VarHandle,
}

impl Holder {
    pub fn new() -> Self {
        let class = ClassDef::builder("Holder")
            .instance_field("final_v", Mutability::Final, V1)
            .instance_field("v", Mutability::Mutable, 0)
            .static_field("static_final_v", Mutability::Final, V1)
            .static_field("static_v", Mutability::Mutable, 0)
            .build()
            .unwrap();
        let lookup = Lookup::new();
        Self {
            recv: Instance::new(&class),
            final_field: lookup.find_var_handle(&class, "final_v", VarType::Int).unwrap(),
            field: lookup.find_var_handle(&class, "v", VarType::Int).unwrap(),
            static_final_field: lookup
                .find_static_var_handle(&class, "static_final_v", VarType::Int)
                .unwrap(),
            static_field: lookup
                .find_static_var_handle(&class, "static_v", VarType::Int)
                .unwrap(),
            array: lookup.array_element_var_handle(VarType::Int).unwrap(),
            class,
        }
    }

    /// Coordinates addressing `vh`'s location; array handles use `array[index]`
    pub fn coords_for(&self, vh: &VarHandle, array: &IntArray, index: i32) -> Vec<Coordinate> {
        match vh.shape() {
            CoordinateShape::Static => no_coords().to_vec(),
            CoordinateShape::Receiver => receiver(&self.recv).to_vec(),
            CoordinateShape::Array => element(array, index).to_vec(),
        }
    }

    pub fn mutable_handles(&self) -> [&VarHandle; 3] {
        [&self.field, &self.static_field, &self.array]
    }

    pub fn final_handles(&self) -> [&VarHandle; 2] {
        [&self.final_field, &self.static_final_field]
    }

    pub fn handles_all(&self) -> [&VarHandle; 5] {
        [
            &self.final_field,
            &self.field,
            &self.static_final_field,
            &self.static_field,
            &self.array,
        ]
    }
}

/// Operands with the right arity for `mode`
pub fn operands_for(mode: AccessMode) -> Vec<i32> {
    match mode.operand_count() {
        0 => vec![],
        1 => vec![V3],
        _ => vec![V1, V2],
    }
}
