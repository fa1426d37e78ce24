//! The class and handles every scenario runs against

use std::sync::Arc;
use tracing::debug;
use varaccess_core::{Mutability, Result, VarType};
use varaccess_handle::{Lookup, VarHandle};
use varaccess_storage::{ClassDef, Instance};

/// Name of the fixture class
pub const FIXTURE_CLASS: &str = "AccessIntFixture";

/// Initial value of both final fields
pub const FINAL_INITIAL: i32 = 0x01234567;

/// Final instance field
pub const FINAL_FIELD: &str = "final_v";
/// Mutable instance field
pub const FIELD: &str = "v";
/// Final static field
pub const STATIC_FINAL_FIELD: &str = "static_final_v";
/// Mutable static field
pub const STATIC_FIELD: &str = "static_v";

/// Array length used by the array scenarios
pub const ARRAY_LENGTH: usize = 10;

/// A fresh fixture class, a receiver, and one handle per location kind
///
/// Each fixture defines its own class, so its static fields are not shared
/// with any other fixture.
#[derive(Debug, Clone)]
pub struct AccessFixture {
    /// Class declaring the four fields
    pub class: Arc<ClassDef>,
    /// Receiver for the instance handles
    pub receiver: Instance,
    /// Handle on [`FINAL_FIELD`]
    pub vh_final_field: VarHandle,
    /// Handle on [`FIELD`]
    pub vh_field: VarHandle,
    /// Handle on [`STATIC_FINAL_FIELD`]
    pub vh_static_final_field: VarHandle,
    /// Handle on [`STATIC_FIELD`]
    pub vh_static_field: VarHandle,
    /// Handle on `int[]` elements
    pub vh_array: VarHandle,
}

impl AccessFixture {
    /// Define the class and bind every handle
    pub fn new() -> Result<Self> {
        let class = fixture_class()?;
        let lookup = Lookup::new();

        let fixture = Self {
            receiver: Instance::new(&class),
            vh_final_field: lookup.find_var_handle(&class, FINAL_FIELD, VarType::Int)?,
            vh_field: lookup.find_var_handle(&class, FIELD, VarType::Int)?,
            vh_static_final_field: lookup.find_static_var_handle(
                &class,
                STATIC_FINAL_FIELD,
                VarType::Int,
            )?,
            vh_static_field: lookup.find_static_var_handle(&class, STATIC_FIELD, VarType::Int)?,
            vh_array: lookup.array_element_var_handle(VarType::Int)?,
            class,
        };
        debug!(target: "varaccess::runner", class = %fixture.class.name(), "Fixture ready");
        Ok(fixture)
    }

    /// Every handle, final ones first
    pub fn handles(&self) -> [&VarHandle; 5] {
        [
            &self.vh_final_field,
            &self.vh_field,
            &self.vh_static_final_field,
            &self.vh_static_field,
            &self.vh_array,
        ]
    }

    /// The mutable handles
    pub fn mutable_handles(&self) -> [&VarHandle; 3] {
        [&self.vh_field, &self.vh_static_field, &self.vh_array]
    }
}

fn fixture_class() -> Result<Arc<ClassDef>> {
    ClassDef::builder(FIXTURE_CLASS)
        .static_field(STATIC_FINAL_FIELD, Mutability::Final, FINAL_INITIAL)
        .static_field(STATIC_FIELD, Mutability::Mutable, 0)
        .instance_field(FINAL_FIELD, Mutability::Final, FINAL_INITIAL)
        .instance_field(FIELD, Mutability::Mutable, 0)
        .build()
}
