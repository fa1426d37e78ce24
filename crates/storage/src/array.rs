//! Integer arrays
//!
//! [`IntArray`] is a fixed-length, shared array of 32-bit cells. Indices are
//! `i32` to match the coordinate type handles accept; any index outside
//! `[0, len)` (negative values included) resolves to no cell.

use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Shared reference to a fixed-length array of `int`
#[derive(Clone)]
pub struct IntArray(Arc<[AtomicI32]>);

impl IntArray {
    /// Zero-filled array of `len` elements
    pub fn new(len: usize) -> Self {
        IntArray((0..len).map(|_| AtomicI32::new(0)).collect())
    }

    /// Array holding a copy of `values`
    pub fn from_values(values: &[i32]) -> Self {
        IntArray(values.iter().map(|v| AtomicI32::new(*v)).collect())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length array
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cell at `index`, or `None` when out of range
    pub fn cell(&self, index: i32) -> Option<&AtomicI32> {
        usize::try_from(index).ok().and_then(|i| self.0.get(i))
    }

    /// Sequentially consistent snapshot of every element
    pub fn snapshot(&self) -> Vec<i32> {
        self.0.iter().map(|c| c.load(Ordering::SeqCst)).collect()
    }

    /// Whether two references denote the same array
    pub fn ptr_eq(&self, other: &IntArray) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for IntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot()).finish()
    }
}
