//! Instances of a class
//!
//! An [`Instance`] is a cheap, clonable reference to one object's slots.
//! Clones alias the same storage; identity is pointer identity.

use crate::layout::{ClassDef, ClassId};
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

struct InstanceData {
    class: Arc<ClassDef>,
    slots: Box<[AtomicI32]>,
}

/// Reference to an object of some [`ClassDef`]
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

impl Instance {
    /// Allocate a new object with every instance field at its declared initial value
    pub fn new(class: &Arc<ClassDef>) -> Self {
        let slots = class
            .instance_template()
            .iter()
            .map(|v| AtomicI32::new(*v))
            .collect();
        Instance(Arc::new(InstanceData {
            class: Arc::clone(class),
            slots,
        }))
    }

    /// The object's class
    pub fn class(&self) -> &Arc<ClassDef> {
        &self.0.class
    }

    /// Whether the object's class is `class_id`
    pub fn is_instance_of(&self, class_id: ClassId) -> bool {
        self.0.class.id() == class_id
    }

    /// Cell backing instance slot `slot`
    pub fn cell(&self, slot: usize) -> Option<&AtomicI32> {
        self.0.slots.get(slot)
    }

    /// Sequentially consistent snapshot of every slot
    pub fn snapshot(&self) -> Vec<i32> {
        self.0.slots.iter().map(|c| c.load(Ordering::SeqCst)).collect()
    }

    /// Whether two references denote the same object
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.0.class.name())
            .field("slots", &self.snapshot())
            .finish()
    }
}
