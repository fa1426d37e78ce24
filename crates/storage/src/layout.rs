//! Class layouts and static storage
//!
//! A [`ClassDef`] declares a fixed set of fields. Each field is either
//! instance-scoped (one slot per [`Instance`](crate::Instance)) or
//! static-scoped (one slot owned by the class itself, for the life of the
//! process).
//!
//! # Design
//!
//! - Slots are `AtomicI32`: every access mode, plain included, goes through
//!   an atomic, so no access is ever a data race.
//! - Field names resolve through an `FxHashMap` built once at `build()`.
//! - Final fields are initialized from their declaration and never written
//!   by this crate again; enforcing that is the handle's job.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;
use varaccess_core::{Error, Mutability, Result, VarType};

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    fn next() -> Self {
        ClassId(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Whether a field lives in each instance or once per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldScope {
    /// One slot per instance
    Instance,
    /// One slot per class
    Static,
}

impl fmt::Display for FieldScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldScope::Instance => write!(f, "instance"),
            FieldScope::Static => write!(f, "static"),
        }
    }
}

/// Declaration of a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name, unique within its class
    pub name: String,
    /// Instance or static
    pub scope: FieldScope,
    /// Mutable or final
    pub mutability: Mutability,
    /// Declared value type
    pub var_type: VarType,
    /// Value the slot holds after initialization
    pub initial: i32,
}

/// A resolved field: its declaration and the slot index within its scope
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    /// The field's declaration
    pub decl: &'a FieldDecl,
    /// Index of the slot within the instance or static slot array
    pub slot: usize,
}

/// A class: field declarations plus the storage of its static fields
pub struct ClassDef {
    id: ClassId,
    name: String,
    fields: Vec<FieldDecl>,
    /// Field name -> (index into `fields`, slot within scope)
    by_name: FxHashMap<String, (usize, usize)>,
    /// Initial values of instance slots, in slot order
    instance_template: Vec<i32>,
    statics: Box<[AtomicI32]>,
}

impl ClassDef {
    /// Start declaring a class
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Process-unique identity
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All field declarations, in declaration order
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Resolve a field by name
    pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        self.by_name.get(name).map(|&(index, slot)| FieldRef {
            decl: &self.fields[index],
            slot,
        })
    }

    /// Number of slots each instance carries
    pub fn instance_slot_count(&self) -> usize {
        self.instance_template.len()
    }

    /// Number of static slots
    pub fn static_slot_count(&self) -> usize {
        self.statics.len()
    }

    /// Cell backing the static slot `slot`
    pub fn static_cell(&self, slot: usize) -> Option<&AtomicI32> {
        self.statics.get(slot)
    }

    pub(crate) fn instance_template(&self) -> &[i32] {
        &self.instance_template
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for [`ClassDef`]
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    fields: Vec<FieldDecl>,
}

impl ClassBuilder {
    /// Declare an instance field
    pub fn instance_field(
        self,
        name: impl Into<String>,
        mutability: Mutability,
        initial: i32,
    ) -> Self {
        self.field(name, FieldScope::Instance, mutability, initial)
    }

    /// Declare a static field
    pub fn static_field(self, name: impl Into<String>, mutability: Mutability, initial: i32) -> Self {
        self.field(name, FieldScope::Static, mutability, initial)
    }

    fn field(
        mut self,
        name: impl Into<String>,
        scope: FieldScope,
        mutability: Mutability,
        initial: i32,
    ) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            scope,
            mutability,
            var_type: VarType::Int,
            initial,
        });
        self
    }

    /// Finish the declaration and allocate static storage
    ///
    /// Field names are unique across both scopes; a repeated name is a
    /// binding error.
    pub fn build(self) -> Result<Arc<ClassDef>> {
        let mut by_name: FxHashMap<String, (usize, usize)> = FxHashMap::default();
        let mut fields: Vec<FieldDecl> = Vec::with_capacity(self.fields.len());
        let mut instance_template = Vec::new();
        let mut statics = Vec::new();

        for decl in self.fields {
            if let Some(&(index, _)) = by_name.get(&decl.name) {
                let first = &fields[index];
                return Err(Error::binding(format!(
                    "duplicate field {}.{}: declared {} {} and again {} {}",
                    self.name, decl.name, first.scope, first.mutability, decl.scope, decl.mutability
                )));
            }
            let slot = match decl.scope {
                FieldScope::Instance => {
                    instance_template.push(decl.initial);
                    instance_template.len() - 1
                }
                FieldScope::Static => {
                    statics.push(AtomicI32::new(decl.initial));
                    statics.len() - 1
                }
            };
            by_name.insert(decl.name.clone(), (fields.len(), slot));
            fields.push(decl);
        }

        let class = ClassDef {
            id: ClassId::next(),
            name: self.name,
            fields,
            by_name,
            instance_template,
            statics: statics.into_boxed_slice(),
        };
        debug!(
            target: "varaccess::storage",
            class = %class.name,
            instance_slots = class.instance_slot_count(),
            static_slots = class.static_slot_count(),
            "Class defined"
        );
        Ok(Arc::new(class))
    }
}
