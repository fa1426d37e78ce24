//! Coordinate model
//!
//! A storage location is addressed through zero, one or two coordinates:
//!
//! | Shape | Coordinates | Example location |
//! |-------|-------------|------------------|
//! | `Static` | none | static field |
//! | `Receiver` | receiver object | instance field |
//! | `Array` | array reference, index | array element |
//!
//! The coordinates passed to an operation must match the handle's shape
//! exactly, in count and in type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Addressing shape of a storage location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateShape {
    /// No coordinates: a static field
    Static,
    /// One receiver coordinate: an instance field
    Receiver,
    /// Array reference plus index: an array element
    Array,
}

impl CoordinateShape {
    /// All shapes (for iteration)
    pub const ALL: [CoordinateShape; 3] = [
        CoordinateShape::Static,
        CoordinateShape::Receiver,
        CoordinateShape::Array,
    ];

    /// Number of coordinates an operation on this shape takes
    pub const fn coordinate_count(self) -> usize {
        match self {
            CoordinateShape::Static => 0,
            CoordinateShape::Receiver => 1,
            CoordinateShape::Array => 2,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            CoordinateShape::Static => 0,
            CoordinateShape::Receiver => 1,
            CoordinateShape::Array => 2,
        }
    }
}

impl fmt::Display for CoordinateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinateShape::Static => "static field",
            CoordinateShape::Receiver => "instance field",
            CoordinateShape::Array => "array element",
        };
        write!(f, "{}", name)
    }
}

/// Whether a location may change after initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutability {
    /// Writable through every write and read-modify-write mode
    Mutable,
    /// Bound once at initialization; only read modes apply
    Final,
}

impl Mutability {
    /// Both mutabilities (for iteration)
    pub const ALL: [Mutability; 2] = [Mutability::Mutable, Mutability::Final];

    /// True for `Final`
    pub const fn is_final(self) -> bool {
        matches!(self, Mutability::Final)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Mutability::Mutable => 0,
            Mutability::Final => 1,
        }
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutability::Mutable => write!(f, "mutable"),
            Mutability::Final => write!(f, "final"),
        }
    }
}

/// Declared value type of a location
///
/// Handles currently operate on 32-bit two's-complement integers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VarType {
    /// 32-bit two's-complement integer
    Int,
}

impl VarType {
    /// Source-level type name
    pub const fn name(self) -> &'static str {
        match self {
            VarType::Int => "int",
        }
    }

    /// Width of the value in bits
    pub const fn bit_width(self) -> u32 {
        match self {
            VarType::Int => 32,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Type of a single coordinate, as reported by a handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateType {
    /// Receiver object of the named class
    Receiver(String),
    /// Reference to an array of the given element type
    Array(VarType),
    /// Array index
    Index,
}

impl fmt::Display for CoordinateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateType::Receiver(class) => write!(f, "{}", class),
            CoordinateType::Array(elem) => write!(f, "{}[]", elem),
            CoordinateType::Index => write!(f, "int"),
        }
    }
}
