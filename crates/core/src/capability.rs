//! Access-mode capability table
//!
//! Which modes a handle supports depends only on the mutability of its
//! location and its coordinate shape, never on the value type:
//!
//! | Mutability | Any shape |
//! |------------|-----------|
//! | Mutable | every mode |
//! | Final | GET, GET_VOLATILE, GET_ACQUIRE, GET_OPAQUE |
//!
//! The table is a constant two-axis array, queried with [`supported`].

use crate::access_mode::AccessMode;
use crate::coordinate::{CoordinateShape, Mutability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of access modes, stored as a bitmask over mode ordinals
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccessModeSet(u32);

const fn bit(mode: AccessMode) -> u32 {
    1 << (mode as u32)
}

impl AccessModeSet {
    /// The empty set
    pub const EMPTY: AccessModeSet = AccessModeSet(0);

    /// Every access mode
    pub const ALL: AccessModeSet = AccessModeSet((1 << AccessMode::COUNT) - 1);

    /// The four read modes
    pub const READS: AccessModeSet = AccessModeSet(
        bit(AccessMode::Get)
            | bit(AccessMode::GetVolatile)
            | bit(AccessMode::GetAcquire)
            | bit(AccessMode::GetOpaque),
    );

    /// Build a set from a slice of modes
    pub fn from_modes(modes: &[AccessMode]) -> Self {
        let mut set = Self::EMPTY;
        for mode in modes {
            set.insert(*mode);
        }
        set
    }

    /// Whether `mode` is in the set
    pub const fn contains(self, mode: AccessMode) -> bool {
        self.0 & bit(mode) != 0
    }

    /// Add `mode` to the set
    pub fn insert(&mut self, mode: AccessMode) {
        self.0 |= bit(mode);
    }

    /// Number of modes in the set
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True when no mode is in the set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Modes in `ALL` but not in this set
    pub const fn complement(self) -> Self {
        AccessModeSet(Self::ALL.0 & !self.0)
    }

    /// Iterate the modes in ordinal order
    pub fn iter(self) -> impl Iterator<Item = AccessMode> {
        AccessMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }
}

impl fmt::Debug for AccessModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<AccessMode> for AccessModeSet {
    fn from_iter<I: IntoIterator<Item = AccessMode>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

/// Indexed by `[Mutability::index()][CoordinateShape::index()]`
const CAPABILITY_TABLE: [[AccessModeSet; 3]; 2] = [
    // Mutable: static, receiver, array
    [AccessModeSet::ALL, AccessModeSet::ALL, AccessModeSet::ALL],
    // Final: static, receiver, array
    [AccessModeSet::READS, AccessModeSet::READS, AccessModeSet::READS],
];

/// Legal access modes for a location of the given shape and mutability
pub const fn supported(shape: CoordinateShape, mutability: Mutability) -> AccessModeSet {
    CAPABILITY_TABLE[mutability.index()][shape.index()]
}

/// Access modes that must be rejected for the given shape and mutability
pub const fn unsupported(shape: CoordinateShape, mutability: Mutability) -> AccessModeSet {
    supported(shape, mutability).complement()
}

/// Whether a single mode is legal for the given shape and mutability
pub const fn is_supported(
    shape: CoordinateShape,
    mutability: Mutability,
    mode: AccessMode,
) -> bool {
    supported(shape, mutability).contains(mode)
}
