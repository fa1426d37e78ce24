//! Runtime coordinates and access outcomes

use std::fmt;
use varaccess_storage::{Instance, IntArray};

/// A single coordinate value passed to a handle operation
#[derive(Debug, Clone)]
pub enum Coordinate {
    /// Receiver object, for instance fields
    Receiver(Instance),
    /// Array reference, for array elements
    Array(IntArray),
    /// Array index, for array elements
    Index(i32),
}

impl Coordinate {
    /// Short type label used in error messages
    pub fn type_label(&self) -> String {
        match self {
            Coordinate::Receiver(recv) => recv.class().name().to_string(),
            Coordinate::Array(_) => "int[]".to_string(),
            Coordinate::Index(_) => "int".to_string(),
        }
    }
}

impl From<Instance> for Coordinate {
    fn from(recv: Instance) -> Self {
        Coordinate::Receiver(recv)
    }
}

impl From<&Instance> for Coordinate {
    fn from(recv: &Instance) -> Self {
        Coordinate::Receiver(recv.clone())
    }
}

impl From<IntArray> for Coordinate {
    fn from(array: IntArray) -> Self {
        Coordinate::Array(array)
    }
}

impl From<&IntArray> for Coordinate {
    fn from(array: &IntArray) -> Self {
        Coordinate::Array(array.clone())
    }
}

impl From<i32> for Coordinate {
    fn from(index: i32) -> Self {
        Coordinate::Index(index)
    }
}

/// Coordinates addressing a static field
pub fn no_coords() -> [Coordinate; 0] {
    []
}

/// Coordinates addressing an instance field of `recv`
pub fn receiver(recv: &Instance) -> [Coordinate; 1] {
    [Coordinate::Receiver(recv.clone())]
}

/// Coordinates addressing `array[index]`
pub fn element(array: &IntArray, index: i32) -> [Coordinate; 2] {
    [Coordinate::Array(array.clone()), Coordinate::Index(index)]
}

/// Result of a dynamically invoked access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Writes produce nothing
    Unit,
    /// Reads, exchanges and fetch-adds produce a value
    Value(i32),
    /// Compare-and-set variants produce a success flag
    Flag(bool),
}

impl AccessOutcome {
    /// The value, if this outcome carries one
    pub fn value(self) -> Option<i32> {
        match self {
            AccessOutcome::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The success flag, if this outcome carries one
    pub fn flag(self) -> Option<bool> {
        match self {
            AccessOutcome::Flag(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOutcome::Unit => write!(f, "()"),
            AccessOutcome::Value(v) => write!(f, "{:#010X}", *v as u32),
            AccessOutcome::Flag(b) => write!(f, "{}", b),
        }
    }
}
