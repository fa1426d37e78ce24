//! Access mode enumeration
//!
//! Every operation a variable handle can perform is named by an [`AccessMode`].
//! Modes are grouped into ordering families:
//!
//! | Family | Modes |
//! |--------|-------|
//! | Plain | GET, SET |
//! | Volatile | GET_VOLATILE, SET_VOLATILE |
//! | AcquireRelease | GET_ACQUIRE, SET_RELEASE |
//! | Opaque | GET_OPAQUE, SET_OPAQUE |
//! | ReadModifyWrite | COMPARE_AND_SET, COMPARE_AND_EXCHANGE_*, WEAK_COMPARE_AND_SET*, GET_AND_SET, GET_AND_ADD, ADD_AND_GET |
//!
//! The set is closed. Resolving a mode from an unknown ordinal or name is an
//! [`Error::InvalidMode`].

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named handle operation
///
/// ## Invariant
///
/// The discriminants are dense, starting at zero, in declaration order.
/// [`AccessModeSet`](crate::capability::AccessModeSet) relies on this to use
/// the discriminant as a bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AccessMode {
    /// Plain read
    Get,
    /// Plain write
    Set,
    /// Sequentially consistent read
    GetVolatile,
    /// Sequentially consistent write
    SetVolatile,
    /// Acquiring read
    GetAcquire,
    /// Releasing write
    SetRelease,
    /// Coherent read with no cross-location ordering
    GetOpaque,
    /// Coherent write with no cross-location ordering
    SetOpaque,
    /// Strong compare-and-set returning a success flag
    CompareAndSet,
    /// Compare-and-exchange returning the witness value, volatile ordering
    CompareAndExchangeVolatile,
    /// Compare-and-exchange returning the witness value, acquire ordering
    CompareAndExchangeAcquire,
    /// Compare-and-exchange returning the witness value, release ordering
    CompareAndExchangeRelease,
    /// Weak compare-and-set with plain ordering (may fail spuriously)
    WeakCompareAndSet,
    /// Weak compare-and-set with volatile ordering (may fail spuriously)
    WeakCompareAndSetVolatile,
    /// Weak compare-and-set with acquire ordering (may fail spuriously)
    WeakCompareAndSetAcquire,
    /// Weak compare-and-set with release ordering (may fail spuriously)
    WeakCompareAndSetRelease,
    /// Atomic exchange returning the previous value
    GetAndSet,
    /// Atomic wrapping add returning the previous value
    GetAndAdd,
    /// Atomic wrapping add returning the new value
    AddAndGet,
}

/// Ordering family an access mode belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessFamily {
    /// GET / SET
    Plain,
    /// GET_VOLATILE / SET_VOLATILE
    Volatile,
    /// GET_ACQUIRE / SET_RELEASE
    AcquireRelease,
    /// GET_OPAQUE / SET_OPAQUE
    Opaque,
    /// Compare-and-set, compare-and-exchange, exchange and fetch-add modes
    ReadModifyWrite,
}

/// Whether a mode reads, writes, or does both atomically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Observes the location without changing it
    Read,
    /// Stores into the location without observing it
    Write,
    /// Observes and conditionally or unconditionally stores, atomically
    ReadModifyWrite,
}

/// Shape of the value an access mode produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    /// Writes return nothing
    Nothing,
    /// Reads, exchanges and fetch-adds return a value of the handle's type
    Value,
    /// Compare-and-set variants return whether the store happened
    Success,
}

impl AccessMode {
    /// Number of access modes
    pub const COUNT: usize = 19;

    /// All access modes, in ordinal order
    pub const ALL: [AccessMode; AccessMode::COUNT] = [
        AccessMode::Get,
        AccessMode::Set,
        AccessMode::GetVolatile,
        AccessMode::SetVolatile,
        AccessMode::GetAcquire,
        AccessMode::SetRelease,
        AccessMode::GetOpaque,
        AccessMode::SetOpaque,
        AccessMode::CompareAndSet,
        AccessMode::CompareAndExchangeVolatile,
        AccessMode::CompareAndExchangeAcquire,
        AccessMode::CompareAndExchangeRelease,
        AccessMode::WeakCompareAndSet,
        AccessMode::WeakCompareAndSetVolatile,
        AccessMode::WeakCompareAndSetAcquire,
        AccessMode::WeakCompareAndSetRelease,
        AccessMode::GetAndSet,
        AccessMode::GetAndAdd,
        AccessMode::AddAndGet,
    ];

    /// Get all access modes as a slice
    pub fn all() -> &'static [AccessMode] {
        &Self::ALL
    }

    /// Dense ordinal of this mode
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Resolve a mode from its ordinal
    ///
    /// Fails with [`Error::InvalidMode`] for any ordinal outside the fixed set.
    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| Error::InvalidMode(format!("ordinal {}", ordinal)))
    }

    /// Canonical upper-case name, e.g. `COMPARE_AND_EXCHANGE_ACQUIRE`
    pub const fn name(self) -> &'static str {
        match self {
            AccessMode::Get => "GET",
            AccessMode::Set => "SET",
            AccessMode::GetVolatile => "GET_VOLATILE",
            AccessMode::SetVolatile => "SET_VOLATILE",
            AccessMode::GetAcquire => "GET_ACQUIRE",
            AccessMode::SetRelease => "SET_RELEASE",
            AccessMode::GetOpaque => "GET_OPAQUE",
            AccessMode::SetOpaque => "SET_OPAQUE",
            AccessMode::CompareAndSet => "COMPARE_AND_SET",
            AccessMode::CompareAndExchangeVolatile => "COMPARE_AND_EXCHANGE_VOLATILE",
            AccessMode::CompareAndExchangeAcquire => "COMPARE_AND_EXCHANGE_ACQUIRE",
            AccessMode::CompareAndExchangeRelease => "COMPARE_AND_EXCHANGE_RELEASE",
            AccessMode::WeakCompareAndSet => "WEAK_COMPARE_AND_SET",
            AccessMode::WeakCompareAndSetVolatile => "WEAK_COMPARE_AND_SET_VOLATILE",
            AccessMode::WeakCompareAndSetAcquire => "WEAK_COMPARE_AND_SET_ACQUIRE",
            AccessMode::WeakCompareAndSetRelease => "WEAK_COMPARE_AND_SET_RELEASE",
            AccessMode::GetAndSet => "GET_AND_SET",
            AccessMode::GetAndAdd => "GET_AND_ADD",
            AccessMode::AddAndGet => "ADD_AND_GET",
        }
    }

    /// Name of the handle method implementing this mode, e.g. `get_acquire`
    pub const fn method_name(self) -> &'static str {
        match self {
            AccessMode::Get => "get",
            AccessMode::Set => "set",
            AccessMode::GetVolatile => "get_volatile",
            AccessMode::SetVolatile => "set_volatile",
            AccessMode::GetAcquire => "get_acquire",
            AccessMode::SetRelease => "set_release",
            AccessMode::GetOpaque => "get_opaque",
            AccessMode::SetOpaque => "set_opaque",
            AccessMode::CompareAndSet => "compare_and_set",
            AccessMode::CompareAndExchangeVolatile => "compare_and_exchange_volatile",
            AccessMode::CompareAndExchangeAcquire => "compare_and_exchange_acquire",
            AccessMode::CompareAndExchangeRelease => "compare_and_exchange_release",
            AccessMode::WeakCompareAndSet => "weak_compare_and_set",
            AccessMode::WeakCompareAndSetVolatile => "weak_compare_and_set_volatile",
            AccessMode::WeakCompareAndSetAcquire => "weak_compare_and_set_acquire",
            AccessMode::WeakCompareAndSetRelease => "weak_compare_and_set_release",
            AccessMode::GetAndSet => "get_and_set",
            AccessMode::GetAndAdd => "get_and_add",
            AccessMode::AddAndGet => "add_and_get",
        }
    }

    /// Ordering family of this mode
    pub const fn family(self) -> AccessFamily {
        match self {
            AccessMode::Get | AccessMode::Set => AccessFamily::Plain,
            AccessMode::GetVolatile | AccessMode::SetVolatile => AccessFamily::Volatile,
            AccessMode::GetAcquire | AccessMode::SetRelease => AccessFamily::AcquireRelease,
            AccessMode::GetOpaque | AccessMode::SetOpaque => AccessFamily::Opaque,
            _ => AccessFamily::ReadModifyWrite,
        }
    }

    /// Whether this mode reads, writes, or does both
    pub const fn kind(self) -> AccessKind {
        match self {
            AccessMode::Get
            | AccessMode::GetVolatile
            | AccessMode::GetAcquire
            | AccessMode::GetOpaque => AccessKind::Read,
            AccessMode::Set
            | AccessMode::SetVolatile
            | AccessMode::SetRelease
            | AccessMode::SetOpaque => AccessKind::Write,
            _ => AccessKind::ReadModifyWrite,
        }
    }

    /// True for the four read modes
    pub const fn is_read_only(self) -> bool {
        matches!(self.kind(), AccessKind::Read)
    }

    /// True for every mode that can change the location
    pub const fn is_mutating(self) -> bool {
        !self.is_read_only()
    }

    /// Number of value operands the mode takes after its coordinates
    pub const fn operand_count(self) -> usize {
        match self {
            AccessMode::Get
            | AccessMode::GetVolatile
            | AccessMode::GetAcquire
            | AccessMode::GetOpaque => 0,
            AccessMode::Set
            | AccessMode::SetVolatile
            | AccessMode::SetRelease
            | AccessMode::SetOpaque
            | AccessMode::GetAndSet
            | AccessMode::GetAndAdd
            | AccessMode::AddAndGet => 1,
            AccessMode::CompareAndSet
            | AccessMode::CompareAndExchangeVolatile
            | AccessMode::CompareAndExchangeAcquire
            | AccessMode::CompareAndExchangeRelease
            | AccessMode::WeakCompareAndSet
            | AccessMode::WeakCompareAndSetVolatile
            | AccessMode::WeakCompareAndSetAcquire
            | AccessMode::WeakCompareAndSetRelease => 2,
        }
    }

    /// Shape of the result this mode produces
    pub const fn return_kind(self) -> ReturnKind {
        match self {
            AccessMode::Set
            | AccessMode::SetVolatile
            | AccessMode::SetRelease
            | AccessMode::SetOpaque => ReturnKind::Nothing,
            AccessMode::CompareAndSet
            | AccessMode::WeakCompareAndSet
            | AccessMode::WeakCompareAndSetVolatile
            | AccessMode::WeakCompareAndSetAcquire
            | AccessMode::WeakCompareAndSetRelease => ReturnKind::Success,
            _ => ReturnKind::Value,
        }
    }

    /// True for the weak compare-and-set variants
    pub const fn may_fail_spuriously(self) -> bool {
        matches!(
            self,
            AccessMode::WeakCompareAndSet
                | AccessMode::WeakCompareAndSetVolatile
                | AccessMode::WeakCompareAndSetAcquire
                | AccessMode::WeakCompareAndSetRelease
        )
    }
}

static BY_NAME: Lazy<FxHashMap<&'static str, AccessMode>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for mode in AccessMode::ALL {
        map.insert(mode.name(), mode);
        map.insert(mode.method_name(), mode);
    }
    map
});

impl FromStr for AccessMode {
    type Err = Error;

    /// Accepts either the canonical name (`GET_ACQUIRE`) or the method name
    /// (`get_acquire`).
    fn from_str(s: &str) -> Result<Self> {
        BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| Error::InvalidMode(format!("name '{}'", s)))
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for AccessFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessFamily::Plain => "plain",
            AccessFamily::Volatile => "volatile",
            AccessFamily::AcquireRelease => "acquire/release",
            AccessFamily::Opaque => "opaque",
            AccessFamily::ReadModifyWrite => "read-modify-write",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Tests
// ============================================================================
