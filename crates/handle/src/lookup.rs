//! Handle lookup
//!
//! Resolves a symbolic binding request to a [`VarHandle`]:
//!
//! | Request | Binds | Fails when |
//! |---------|-------|------------|
//! | `find_var_handle` | instance field | field unknown, static, or of another type |
//! | `find_static_var_handle` | static field | field unknown, instance-scoped, or of another type |
//! | `array_element_var_handle` | any `int[]` element | element type unsupported |
//!
//! Crossing the instance/static category is always a [`Error::Binding`]; the
//! lookup never silently rebinds to the other scope.

use crate::handle::{Target, VarHandle};
use std::sync::Arc;
use tracing::debug;
use varaccess_core::{Error, Mutability, Result, VarType};
use varaccess_storage::{ClassDef, FieldRef, FieldScope};

/// Lookup context producing handles
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookup {
    _private: (),
}

impl Lookup {
    /// Create a lookup context
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an instance field of `class`
    pub fn find_var_handle(
        &self,
        class: &Arc<ClassDef>,
        name: &str,
        var_type: VarType,
    ) -> Result<VarHandle> {
        let field = resolve(class, name, var_type, FieldScope::Instance)?;
        let handle = VarHandle::bind(
            Target::InstanceField {
                class: Arc::clone(class),
                field: name.to_string(),
                slot: field.slot,
            },
            field.decl.mutability,
            var_type,
        );
        debug!(target: "varaccess::lookup", handle = %handle, mutability = %handle.mutability(), "Bound instance field");
        Ok(handle)
    }

    /// Bind a static field of `class`
    pub fn find_static_var_handle(
        &self,
        class: &Arc<ClassDef>,
        name: &str,
        var_type: VarType,
    ) -> Result<VarHandle> {
        let field = resolve(class, name, var_type, FieldScope::Static)?;
        let handle = VarHandle::bind(
            Target::StaticField {
                class: Arc::clone(class),
                field: name.to_string(),
                slot: field.slot,
            },
            field.decl.mutability,
            var_type,
        );
        debug!(target: "varaccess::lookup", handle = %handle, mutability = %handle.mutability(), "Bound static field");
        Ok(handle)
    }

    /// Bind the elements of any array whose element type is `element`
    pub fn array_element_var_handle(&self, element: VarType) -> Result<VarHandle> {
        match element {
            VarType::Int => Ok(VarHandle::bind(
                Target::ArrayElement { element },
                Mutability::Mutable,
                element,
            )),
            other => Err(Error::binding(format!(
                "no array element handle for {}[]",
                other
            ))),
        }
    }
}

fn resolve<'a>(
    class: &'a ClassDef,
    name: &str,
    var_type: VarType,
    scope: FieldScope,
) -> Result<FieldRef<'a>> {
    let field = class.field(name).ok_or_else(|| {
        debug!(target: "varaccess::lookup", class = %class.name(), field = %name, "No such field");
        Error::binding(format!("no field '{}' in {}", name, class.name()))
    })?;

    if field.decl.scope != scope {
        debug!(
            target: "varaccess::lookup",
            class = %class.name(),
            field = %name,
            declared = %field.decl.scope,
            requested = %scope,
            "Scope mismatch"
        );
        return Err(Error::binding(format!(
            "field '{}' in {} is {}, requested {}",
            name,
            class.name(),
            field.decl.scope,
            scope
        )));
    }

    if field.decl.var_type != var_type {
        return Err(Error::binding(format!(
            "field '{}' in {} has type {}, requested {}",
            name,
            class.name(),
            field.decl.var_type,
            var_type
        )));
    }

    Ok(field)
}
