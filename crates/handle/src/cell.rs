//! Executes access modes against a single atomic cell
//!
//! Every function takes the mode's [`OrderingContract`] and uses exactly the
//! orderings it names. Callers have already checked capability, coordinates
//! and bounds; nothing here can fail.

use std::sync::atomic::AtomicI32;
use varaccess_core::{AccessOrdering, OrderingContract};

#[inline]
pub(crate) fn load(cell: &AtomicI32, contract: &OrderingContract) -> i32 {
    debug_assert!(
        matches!(contract.access, AccessOrdering::Load(_)),
        "{} does not load",
        contract.mode
    );
    cell.load(contract.access.primary())
}

#[inline]
pub(crate) fn store(cell: &AtomicI32, contract: &OrderingContract, value: i32) {
    debug_assert!(
        matches!(contract.access, AccessOrdering::Store(_)),
        "{} does not store",
        contract.mode
    );
    cell.store(value, contract.access.primary());
}

/// Returns the witness value: `expected` on success, the current value on failure
///
/// A weak contract may report failure even when the current value equals
/// `expected`; the witness then equals `expected` and nothing was stored.
#[inline]
pub(crate) fn compare_exchange(
    cell: &AtomicI32,
    contract: &OrderingContract,
    expected: i32,
    new: i32,
) -> Result<i32, i32> {
    let rmw = rmw_ordering(contract).rmw();
    if contract.spurious_failure {
        cell.compare_exchange_weak(expected, new, rmw.success, rmw.failure)
    } else {
        cell.compare_exchange(expected, new, rmw.success, rmw.failure)
    }
}

#[inline]
pub(crate) fn swap(cell: &AtomicI32, contract: &OrderingContract, value: i32) -> i32 {
    cell.swap(value, rmw_ordering(contract).primary())
}

/// Wrapping add; returns the previous value
#[inline]
pub(crate) fn fetch_add(cell: &AtomicI32, contract: &OrderingContract, delta: i32) -> i32 {
    cell.fetch_add(delta, rmw_ordering(contract).primary())
}

fn rmw_ordering(contract: &OrderingContract) -> AccessOrdering {
    debug_assert!(
        matches!(contract.access, AccessOrdering::Rmw(_)),
        "{} is not a read-modify-write",
        contract.mode
    );
    contract.access
}
