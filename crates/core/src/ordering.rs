//! Ordering contracts per access mode
//!
//! Each access mode maps to the atomic orderings that implement it:
//!
//! | Family | Load | Store | RMW success / failure |
//! |--------|------|-------|-----------------------|
//! | Plain | Relaxed | Relaxed | Relaxed / Relaxed (weak CAS) |
//! | Opaque | Relaxed | Relaxed | - |
//! | Acquire/Release | Acquire | Release | Acquire / Acquire, Release / Relaxed |
//! | Volatile | SeqCst | SeqCst | SeqCst / SeqCst |
//!
//! Plain accesses to shared storage still go through atomics: a plain access
//! carries no synchronizes-with edge, but it is never a data race. Plain and
//! opaque therefore share orderings and differ only in their declared
//! [`Visibility`].
//!
//! Compare-and-set, exchange and fetch-add without a suffix are volatile.

use crate::access_mode::{AccessKind, AccessMode};
use std::sync::atomic::Ordering;

/// Declared visibility guarantee of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Program order on the accessing thread only
    Plain,
    /// Per-location atomicity and coherence, no cross-location ordering
    Opaque,
    /// Later accesses are not hoisted above this read
    Acquire,
    /// Earlier accesses are not sunk below this write
    Release,
    /// Member of the single total order of volatile accesses
    Volatile,
}

/// Orderings for a compare-and-set style operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RmwOrdering {
    /// Ordering when the store happens
    pub success: Ordering,
    /// Ordering of the load when the comparison fails
    pub failure: Ordering,
}

/// Orderings of the one atomic access a mode performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOrdering {
    /// A load
    Load(Ordering),
    /// A store
    Store(Ordering),
    /// A read-modify-write
    Rmw(RmwOrdering),
}

impl AccessOrdering {
    /// Ordering of the load or store, or of a successful read-modify-write
    pub const fn primary(&self) -> Ordering {
        match *self {
            AccessOrdering::Load(o) | AccessOrdering::Store(o) => o,
            AccessOrdering::Rmw(rmw) => rmw.success,
        }
    }

    /// Read-modify-write orderings; a load or store uses its own ordering for both
    pub const fn rmw(&self) -> RmwOrdering {
        match *self {
            AccessOrdering::Rmw(rmw) => rmw,
            AccessOrdering::Load(o) | AccessOrdering::Store(o) => RmwOrdering {
                success: o,
                failure: o,
            },
        }
    }
}

/// Ordering contract of a single access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderingContract {
    /// The mode this contract describes
    pub mode: AccessMode,
    /// Declared visibility guarantee
    pub visibility: Visibility,
    /// Orderings of the access the mode performs
    pub access: AccessOrdering,
    /// Whether the comparison may fail while the precondition holds
    pub spurious_failure: bool,
}

impl OrderingContract {
    const fn read(mode: AccessMode, visibility: Visibility, load: Ordering) -> Self {
        OrderingContract {
            mode,
            visibility,
            access: AccessOrdering::Load(load),
            spurious_failure: false,
        }
    }

    const fn write(mode: AccessMode, visibility: Visibility, store: Ordering) -> Self {
        OrderingContract {
            mode,
            visibility,
            access: AccessOrdering::Store(store),
            spurious_failure: false,
        }
    }

    const fn rmw(
        mode: AccessMode,
        visibility: Visibility,
        success: Ordering,
        failure: Ordering,
    ) -> Self {
        OrderingContract {
            mode,
            visibility,
            access: AccessOrdering::Rmw(RmwOrdering { success, failure }),
            spurious_failure: mode.may_fail_spuriously(),
        }
    }

    /// Whether a write in this mode publishes earlier accesses
    pub const fn releases(&self) -> bool {
        let ordering = match self.access {
            AccessOrdering::Store(store) => store,
            AccessOrdering::Rmw(rmw) => rmw.success,
            AccessOrdering::Load(_) => return false,
        };
        matches!(
            ordering,
            Ordering::Release | Ordering::AcqRel | Ordering::SeqCst
        )
    }

    /// Whether a read in this mode observes accesses published before it
    pub const fn acquires(&self) -> bool {
        let ordering = match self.access {
            AccessOrdering::Load(load) => load,
            AccessOrdering::Rmw(rmw) => rmw.success,
            AccessOrdering::Store(_) => return false,
        };
        matches!(
            ordering,
            Ordering::Acquire | Ordering::AcqRel | Ordering::SeqCst
        )
    }

    /// Whether the mode takes part in the single total order of volatile accesses
    pub const fn is_totally_ordered(&self) -> bool {
        matches!(self.visibility, Visibility::Volatile)
    }
}

/// Ordering contract for `mode`
pub const fn contract(mode: AccessMode) -> OrderingContract {
    use AccessMode::*;
    use Ordering::{Acquire, Relaxed, Release, SeqCst};
    match mode {
        Get => OrderingContract::read(mode, Visibility::Plain, Relaxed),
        Set => OrderingContract::write(mode, Visibility::Plain, Relaxed),
        GetVolatile => OrderingContract::read(mode, Visibility::Volatile, SeqCst),
        SetVolatile => OrderingContract::write(mode, Visibility::Volatile, SeqCst),
        GetAcquire => OrderingContract::read(mode, Visibility::Acquire, Acquire),
        SetRelease => OrderingContract::write(mode, Visibility::Release, Release),
        GetOpaque => OrderingContract::read(mode, Visibility::Opaque, Relaxed),
        SetOpaque => OrderingContract::write(mode, Visibility::Opaque, Relaxed),
        CompareAndSet
        | CompareAndExchangeVolatile
        | WeakCompareAndSetVolatile
        | GetAndSet
        | GetAndAdd
        | AddAndGet => OrderingContract::rmw(mode, Visibility::Volatile, SeqCst, SeqCst),
        CompareAndExchangeAcquire | WeakCompareAndSetAcquire => {
            OrderingContract::rmw(mode, Visibility::Acquire, Acquire, Acquire)
        }
        CompareAndExchangeRelease | WeakCompareAndSetRelease => {
            OrderingContract::rmw(mode, Visibility::Release, Release, Relaxed)
        }
        WeakCompareAndSet => OrderingContract::rmw(mode, Visibility::Plain, Relaxed, Relaxed),
    }
}

/// Whether a write in `writer` paired with a later read in `reader` of the
/// same location establishes happens-before
///
/// `writer` must be able to store and `reader` must be able to load;
/// otherwise no edge exists.
pub const fn happens_before(writer: AccessMode, reader: AccessMode) -> bool {
    if matches!(writer.kind(), AccessKind::Read) || matches!(reader.kind(), AccessKind::Write) {
        return false;
    }
    contract(writer).releases() && contract(reader).acquires()
}
