//! Variable handles
//!
//! A [`VarHandle`] binds one coordinate shape, mutability and value type to a
//! concrete location: an instance field of some class, a static field, or an
//! element of any `int[]`.
//!
//! ## Check order
//!
//! Every operation runs the same checks, all before storage is touched:
//!
//! ```text
//! 1. capability   - mode legal for (shape, mutability)?   else UnsupportedOperation
//! 2. operands     - operand count matches the mode?       else IllegalArgument
//! 3. coordinates  - count, types and receiver class?      else IllegalArgument
//! 4. bounds       - array index within [0, length)?       else IndexOutOfBounds
//! 5. execute      - apply the mode's ordering contract to the cell
//! ```
//!
//! Handles are immutable and cheap to clone.

use crate::cell;
use crate::coordinate::{AccessOutcome, Coordinate};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::sync::atomic::AtomicI32;
use std::sync::Arc;
use tracing::trace;
use varaccess_core::{
    contract, supported, AccessMode, AccessModeSet, CoordinateShape, CoordinateType, Error,
    Mutability, OrderingContract, Result, ReturnKind, VarType,
};
use varaccess_storage::ClassDef;

#[derive(Debug)]
pub(crate) enum Target {
    InstanceField {
        class: Arc<ClassDef>,
        field: String,
        slot: usize,
    },
    StaticField {
        class: Arc<ClassDef>,
        field: String,
        slot: usize,
    },
    ArrayElement {
        element: VarType,
    },
}

impl Target {
    fn shape(&self) -> CoordinateShape {
        match self {
            Target::InstanceField { .. } => CoordinateShape::Receiver,
            Target::StaticField { .. } => CoordinateShape::Static,
            Target::ArrayElement { .. } => CoordinateShape::Array,
        }
    }
}

#[derive(Debug)]
struct HandleInner {
    target: Target,
    mutability: Mutability,
    var_type: VarType,
    modes: AccessModeSet,
}

/// Typed, ordered accessor over a single kind of storage location
#[derive(Clone)]
pub struct VarHandle(Arc<HandleInner>);

impl VarHandle {
    pub(crate) fn bind(target: Target, mutability: Mutability, var_type: VarType) -> Self {
        let modes = supported(target.shape(), mutability);
        VarHandle(Arc::new(HandleInner {
            target,
            mutability,
            var_type,
            modes,
        }))
    }

    /// Coordinate shape of the bound location
    pub fn shape(&self) -> CoordinateShape {
        self.0.target.shape()
    }

    /// Mutability of the bound location
    pub fn mutability(&self) -> Mutability {
        self.0.mutability
    }

    /// Value type of the bound location
    pub fn var_type(&self) -> VarType {
        self.0.var_type
    }

    /// Types of the coordinates every operation takes, in order
    pub fn coordinate_types(&self) -> SmallVec<[CoordinateType; 2]> {
        match &self.0.target {
            Target::InstanceField { class, .. } => {
                smallvec![CoordinateType::Receiver(class.name().to_string())]
            }
            Target::StaticField { .. } => SmallVec::new(),
            Target::ArrayElement { element } => {
                smallvec![CoordinateType::Array(*element), CoordinateType::Index]
            }
        }
    }

    /// Every mode this handle supports
    pub fn supported_modes(&self) -> AccessModeSet {
        self.0.modes
    }

    /// Whether `mode` is supported
    pub fn is_access_mode_supported(&self, mode: AccessMode) -> bool {
        self.0.modes.contains(mode)
    }

    // ------------------------------------------------------------------
    // Plain, volatile, acquire/release, opaque
    // ------------------------------------------------------------------

    /// Plain read
    pub fn get(&self, coords: &[Coordinate]) -> Result<i32> {
        self.load(AccessMode::Get, coords)
    }

    /// Plain write
    pub fn set(&self, coords: &[Coordinate], value: i32) -> Result<()> {
        self.store(AccessMode::Set, coords, value)
    }

    /// Volatile read
    pub fn get_volatile(&self, coords: &[Coordinate]) -> Result<i32> {
        self.load(AccessMode::GetVolatile, coords)
    }

    /// Volatile write
    pub fn set_volatile(&self, coords: &[Coordinate], value: i32) -> Result<()> {
        self.store(AccessMode::SetVolatile, coords, value)
    }

    /// Acquiring read
    pub fn get_acquire(&self, coords: &[Coordinate]) -> Result<i32> {
        self.load(AccessMode::GetAcquire, coords)
    }

    /// Releasing write
    pub fn set_release(&self, coords: &[Coordinate], value: i32) -> Result<()> {
        self.store(AccessMode::SetRelease, coords, value)
    }

    /// Opaque read
    pub fn get_opaque(&self, coords: &[Coordinate]) -> Result<i32> {
        self.load(AccessMode::GetOpaque, coords)
    }

    /// Opaque write
    pub fn set_opaque(&self, coords: &[Coordinate], value: i32) -> Result<()> {
        self.store(AccessMode::SetOpaque, coords, value)
    }

    // ------------------------------------------------------------------
    // Compare-and-set / compare-and-exchange
    // ------------------------------------------------------------------

    /// Stores `new` iff the current value is `expected`; never fails spuriously
    pub fn compare_and_set(&self, coords: &[Coordinate], expected: i32, new: i32) -> Result<bool> {
        self.cas(AccessMode::CompareAndSet, coords, expected, new)
    }

    /// Volatile compare-and-exchange; returns the witness value
    pub fn compare_and_exchange_volatile(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<i32> {
        self.cae(AccessMode::CompareAndExchangeVolatile, coords, expected, new)
    }

    /// Acquiring compare-and-exchange; returns the witness value
    pub fn compare_and_exchange_acquire(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<i32> {
        self.cae(AccessMode::CompareAndExchangeAcquire, coords, expected, new)
    }

    /// Releasing compare-and-exchange; returns the witness value
    pub fn compare_and_exchange_release(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<i32> {
        self.cae(AccessMode::CompareAndExchangeRelease, coords, expected, new)
    }

    /// Plain weak compare-and-set; may fail spuriously
    pub fn weak_compare_and_set(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<bool> {
        self.cas(AccessMode::WeakCompareAndSet, coords, expected, new)
    }

    /// Volatile weak compare-and-set; may fail spuriously
    pub fn weak_compare_and_set_volatile(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<bool> {
        self.cas(AccessMode::WeakCompareAndSetVolatile, coords, expected, new)
    }

    /// Acquiring weak compare-and-set; may fail spuriously
    pub fn weak_compare_and_set_acquire(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<bool> {
        self.cas(AccessMode::WeakCompareAndSetAcquire, coords, expected, new)
    }

    /// Releasing weak compare-and-set; may fail spuriously
    pub fn weak_compare_and_set_release(
        &self,
        coords: &[Coordinate],
        expected: i32,
        new: i32,
    ) -> Result<bool> {
        self.cas(AccessMode::WeakCompareAndSetRelease, coords, expected, new)
    }

    // ------------------------------------------------------------------
    // Exchange and fetch-add
    // ------------------------------------------------------------------

    /// Stores `value`; returns the previous value
    pub fn get_and_set(&self, coords: &[Coordinate], value: i32) -> Result<i32> {
        let (cell, c) = self.checked(AccessMode::GetAndSet, coords, 1)?;
        Ok(cell::swap(cell, &c, value))
    }

    /// Wrapping add; returns the previous value
    pub fn get_and_add(&self, coords: &[Coordinate], delta: i32) -> Result<i32> {
        let (cell, c) = self.checked(AccessMode::GetAndAdd, coords, 1)?;
        Ok(cell::fetch_add(cell, &c, delta))
    }

    /// Wrapping add; returns the new value
    pub fn add_and_get(&self, coords: &[Coordinate], delta: i32) -> Result<i32> {
        let (cell, c) = self.checked(AccessMode::AddAndGet, coords, 1)?;
        Ok(cell::fetch_add(cell, &c, delta).wrapping_add(delta))
    }

    // ------------------------------------------------------------------
    // Dynamic invocation
    // ------------------------------------------------------------------

    /// Invoke `mode` with value operands in declaration order
    ///
    /// Writes and exchanges take the new value; compare-and-set variants take
    /// `[expected, new]`; fetch-adds take the delta.
    pub fn invoke(
        &self,
        mode: AccessMode,
        coords: &[Coordinate],
        operands: &[i32],
    ) -> Result<AccessOutcome> {
        self.check_supported(mode)?;
        check_operands(mode, operands.len())?;

        let outcome = match (mode.return_kind(), operands) {
            (ReturnKind::Nothing, &[value]) => {
                self.store(mode, coords, value)?;
                AccessOutcome::Unit
            }
            (ReturnKind::Success, &[expected, new]) => {
                AccessOutcome::Flag(self.cas(mode, coords, expected, new)?)
            }
            (ReturnKind::Value, &[]) => AccessOutcome::Value(self.load(mode, coords)?),
            (ReturnKind::Value, &[expected, new]) => {
                AccessOutcome::Value(self.cae(mode, coords, expected, new)?)
            }
            (ReturnKind::Value, &[value]) => AccessOutcome::Value(match mode {
                AccessMode::GetAndSet => self.get_and_set(coords, value)?,
                AccessMode::GetAndAdd => self.get_and_add(coords, value)?,
                AccessMode::AddAndGet => self.add_and_get(coords, value)?,
                _ => return Err(operand_mismatch(mode, operands.len())),
            }),
            _ => return Err(operand_mismatch(mode, operands.len())),
        };
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn load(&self, mode: AccessMode, coords: &[Coordinate]) -> Result<i32> {
        let (cell, c) = self.checked(mode, coords, 0)?;
        Ok(cell::load(cell, &c))
    }

    fn store(&self, mode: AccessMode, coords: &[Coordinate], value: i32) -> Result<()> {
        let (cell, c) = self.checked(mode, coords, 1)?;
        cell::store(cell, &c, value);
        Ok(())
    }

    fn cas(&self, mode: AccessMode, coords: &[Coordinate], expected: i32, new: i32) -> Result<bool> {
        let (cell, c) = self.checked(mode, coords, 2)?;
        Ok(cell::compare_exchange(cell, &c, expected, new).is_ok())
    }

    fn cae(&self, mode: AccessMode, coords: &[Coordinate], expected: i32, new: i32) -> Result<i32> {
        let (cell, c) = self.checked(mode, coords, 2)?;
        Ok(match cell::compare_exchange(cell, &c, expected, new) {
            Ok(witness) | Err(witness) => witness,
        })
    }

    /// Runs every pre-access check and resolves the cell
    fn checked<'a>(
        &'a self,
        mode: AccessMode,
        coords: &'a [Coordinate],
        operands: usize,
    ) -> Result<(&'a AtomicI32, OrderingContract)> {
        self.check_supported(mode)?;
        check_operands(mode, operands)?;
        let cell = self.resolve(coords)?;
        trace!(target: "varaccess::access", handle = %self, mode = %mode, "access");
        Ok((cell, contract(mode)))
    }

    fn check_supported(&self, mode: AccessMode) -> Result<()> {
        if self.0.modes.contains(mode) {
            Ok(())
        } else {
            Err(Error::UnsupportedOperation {
                mode,
                shape: self.shape(),
                mutability: self.0.mutability,
            })
        }
    }

    fn resolve<'a>(&'a self, coords: &'a [Coordinate]) -> Result<&'a AtomicI32> {
        let expected = self.shape().coordinate_count();
        if coords.len() != expected {
            return Err(Error::illegal_argument(format!(
                "{} takes {} coordinate(s), got {}",
                self,
                expected,
                coords.len()
            )));
        }

        match (&self.0.target, coords) {
            (Target::StaticField { class, field, slot }, []) => {
                class.static_cell(*slot).ok_or_else(|| {
                    Error::illegal_argument(format!("no static slot for {}.{}", class.name(), field))
                })
            }
            (Target::InstanceField { class, field, slot }, [Coordinate::Receiver(recv)]) => {
                if !recv.is_instance_of(class.id()) {
                    return Err(Error::illegal_argument(format!(
                        "receiver of class {} is not a {}",
                        recv.class().name(),
                        class.name()
                    )));
                }
                recv.cell(*slot).ok_or_else(|| {
                    Error::illegal_argument(format!("no slot for {}.{}", class.name(), field))
                })
            }
            (Target::ArrayElement { .. }, [Coordinate::Array(array), Coordinate::Index(index)]) => {
                array.cell(*index).ok_or(Error::IndexOutOfBounds {
                    index: *index,
                    length: array.len(),
                })
            }
            (_, coords) => {
                let got: Vec<String> = coords.iter().map(Coordinate::type_label).collect();
                let want: Vec<String> = self
                    .coordinate_types()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                Err(Error::illegal_argument(format!(
                    "{} takes coordinates ({}), got ({})",
                    self,
                    want.join(", "),
                    got.join(", ")
                )))
            }
        }
    }
}

fn check_operands(mode: AccessMode, got: usize) -> Result<()> {
    if mode.operand_count() == got {
        Ok(())
    } else {
        Err(operand_mismatch(mode, got))
    }
}

fn operand_mismatch(mode: AccessMode, got: usize) -> Error {
    Error::illegal_argument(format!(
        "{} takes {} operand(s), got {}",
        mode,
        mode.operand_count(),
        got
    ))
}

impl fmt::Display for VarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.target {
            Target::InstanceField { class, field, .. } => {
                write!(f, "VarHandle[{} {}.{}]", self.0.var_type, class.name(), field)
            }
            Target::StaticField { class, field, .. } => {
                write!(f, "VarHandle[static {} {}.{}]", self.0.var_type, class.name(), field)
            }
            Target::ArrayElement { element } => write!(f, "VarHandle[{}[]]", element),
        }
    }
}

impl fmt::Debug for VarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarHandle")
            .field("target", &self.0.target)
            .field("mutability", &self.0.mutability)
            .field("var_type", &self.0.var_type)
            .field("modes", &self.0.modes)
            .finish()
    }
}
