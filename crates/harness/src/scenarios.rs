//! Scenario bodies
//!
//! Each scenario takes the handle and its coordinates as explicit
//! parameters. Mutable locations all run the same literal sequence, in which
//! every step relies on the value left behind by the step before it:
//!
//! | Step | Operation | Expect |
//! |------|-----------|--------|
//! | 1 | plain/volatile/release/opaque write, paired read | written value |
//! | 2 | compareAndSet, succeeding then failing | flag and value |
//! | 3 | compareAndExchange{Volatile,Acquire,Release} | witness and value |
//! | 4 | weakCompareAndSet{,Acquire,Release,Volatile} | success within budget |
//! | 5 | getAndSet | previous value |
//! | 6 | getAndAdd then addAndGet of [`V3`] | wrapping sum |

use varaccess_core::{supported, unsupported, AccessMode, ErrorKind, Mutability};
use varaccess_handle::{element, no_coords, receiver, Coordinate, VarHandle};
use varaccess_storage::{Instance, IntArray};

use crate::check::{
    check_flag, check_unchanged, check_value, expect_error, retry_weak, CheckResult, Observe,
};
use crate::fixture::ARRAY_LENGTH;

/// First bit pattern
pub const V1: i32 = 0x01234567;
/// Second bit pattern
pub const V2: i32 = 0x89ABCDEFu32 as i32;
/// Third bit pattern, also the fetch-add delta
pub const V3: i32 = 0xCAFEBABEu32 as i32;

/// Value a mutable location holds once the sequence completes
pub const SEQUENCE_RESULT: i32 = V1.wrapping_add(V3).wrapping_add(V3);

/// Indices outside `[0, ARRAY_LENGTH)` probed by the bounds scenario
pub const OUT_OF_BOUNDS_INDICES: [i32; 5] = [
    -1,
    i32::MIN,
    ARRAY_LENGTH as i32,
    ARRAY_LENGTH as i32 + 1,
    i32::MAX,
];

/// Settings a scenario body reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioContext {
    /// Attempts allowed for a weak compare-and-set
    pub weak_attempts: u32,
}

impl Default for ScenarioContext {
    fn default() -> Self {
        Self { weak_attempts: 10 }
    }
}

// ============================================================================
// Final fields
// ============================================================================

/// Every read mode of a final instance field returns its initial value
pub fn instance_final_field(recv: &Instance, vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    read_modes_observe(vh, &receiver(recv), V1)
}

/// Every write and update mode of a final instance field is rejected
pub fn instance_final_field_unsupported(
    recv: &Instance,
    vh: &VarHandle,
    _ctx: &ScenarioContext,
) -> CheckResult {
    rejects_unsupported_modes(vh, &receiver(recv))
}

/// Every read mode of a final static field returns its initial value
pub fn static_final_field(vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    read_modes_observe(vh, &no_coords(), V1)
}

/// Every write and update mode of a final static field is rejected
pub fn static_final_field_unsupported(vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    rejects_unsupported_modes(vh, &no_coords())
}

fn read_modes_observe(vh: &VarHandle, coords: &[Coordinate], expected: i32) -> CheckResult {
    check_value(
        "get int value",
        vh.get(coords).observe("get int value")?,
        expected,
    )?;
    check_value(
        "getVolatile int value",
        vh.get_volatile(coords).observe("getVolatile int value")?,
        expected,
    )?;
    check_value(
        "getAcquire int value",
        vh.get_acquire(coords).observe("getAcquire int value")?,
        expected,
    )?;
    check_value(
        "getOpaque int value",
        vh.get_opaque(coords).observe("getOpaque int value")?,
        expected,
    )
}

fn rejects_unsupported_modes(vh: &VarHandle, coords: &[Coordinate]) -> CheckResult {
    let before = vh.get(coords).observe("get before unsupported access")?;
    for mode in unsupported(vh.shape(), vh.mutability()).iter() {
        let what = format!("{} int", mode.method_name());
        expect_error(
            &what,
            vh.invoke(mode, coords, &probe_operands(mode)),
            ErrorKind::UnsupportedOperation,
        )?;
        let after = vh.get(coords).observe(&what)?;
        check_value(&format!("{} leaves value", mode.method_name()), after, before)?;
    }
    Ok(())
}

// ============================================================================
// Mutable locations
// ============================================================================

/// The full literal sequence against a mutable instance field
pub fn instance_field(recv: &Instance, vh: &VarHandle, ctx: &ScenarioContext) -> CheckResult {
    access_sequence(vh, &receiver(recv), ctx)
}

/// A mutable instance field has no unsupported modes
pub fn instance_field_unsupported(
    _recv: &Instance,
    vh: &VarHandle,
    _ctx: &ScenarioContext,
) -> CheckResult {
    supports_every_mode(vh)
}

/// The full literal sequence against a mutable static field
pub fn static_field(vh: &VarHandle, ctx: &ScenarioContext) -> CheckResult {
    access_sequence(vh, &no_coords(), ctx)
}

/// A mutable static field has no unsupported modes
pub fn static_field_unsupported(vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    supports_every_mode(vh)
}

/// The full literal sequence against each element of `array`, in order
pub fn array(array: &IntArray, vh: &VarHandle, ctx: &ScenarioContext) -> CheckResult {
    for i in 0..array.len() as i32 {
        access_sequence(vh, &element(array, i), ctx)?;
    }
    Ok(())
}

/// An array element handle has no unsupported modes
pub fn array_unsupported(vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    supports_every_mode(vh)
}

/// Every mode at every out-of-range index fails and leaves the array unchanged
pub fn array_index_out_of_bounds(vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    let array = IntArray::new(ARRAY_LENGTH);
    let before = array.snapshot();
    for index in OUT_OF_BOUNDS_INDICES {
        let coords = element(&array, index);
        for mode in AccessMode::ALL {
            let what = format!("{} int at index {}", mode.method_name(), index);
            expect_error(
                &what,
                vh.invoke(mode, &coords, &probe_operands(mode)),
                ErrorKind::IndexOutOfBounds,
            )?;
            check_unchanged(&what, &before, array.snapshot())?;
        }
    }
    Ok(())
}

fn supports_every_mode(vh: &VarHandle) -> CheckResult {
    for mode in AccessMode::ALL {
        check_flag(
            &format!("isAccessModeSupported {}", mode),
            vh.is_access_mode_supported(mode),
            true,
        )?;
    }
    check_value(
        "unsupported mode count",
        unsupported(vh.shape(), vh.mutability()).len() as i32,
        0,
    )
}

fn access_sequence(vh: &VarHandle, coords: &[Coordinate], ctx: &ScenarioContext) -> CheckResult {
    // Plain
    vh.set(coords, V1).observe("set int")?;
    check_value("set int value", vh.get(coords).observe("get int")?, V1)?;

    // Volatile
    vh.set_volatile(coords, V2).observe("setVolatile int")?;
    check_value(
        "setVolatile int value",
        vh.get_volatile(coords).observe("getVolatile int")?,
        V2,
    )?;

    // Lazy
    vh.set_release(coords, V1).observe("setRelease int")?;
    check_value(
        "setRelease int value",
        vh.get_acquire(coords).observe("getAcquire int")?,
        V1,
    )?;

    // Opaque
    vh.set_opaque(coords, V2).observe("setOpaque int")?;
    check_value(
        "setOpaque int value",
        vh.get_opaque(coords).observe("getOpaque int")?,
        V2,
    )?;

    vh.set(coords, V1).observe("set int")?;

    // Compare
    let r = vh
        .compare_and_set(coords, V1, V2)
        .observe("success compareAndSet int")?;
    check_flag("success compareAndSet int", r, true)?;
    current_is(vh, coords, V2, "success compareAndSet int value")?;

    let r = vh
        .compare_and_set(coords, V1, V3)
        .observe("failing compareAndSet int")?;
    check_flag("failing compareAndSet int", r, false)?;
    current_is(vh, coords, V2, "failing compareAndSet int value")?;

    let r = vh
        .compare_and_exchange_volatile(coords, V2, V1)
        .observe("success compareAndExchangeVolatile int")?;
    check_value("success compareAndExchangeVolatile int", r, V2)?;
    current_is(vh, coords, V1, "success compareAndExchangeVolatile int value")?;

    let r = vh
        .compare_and_exchange_volatile(coords, V2, V3)
        .observe("failing compareAndExchangeVolatile int")?;
    check_value("failing compareAndExchangeVolatile int", r, V1)?;
    current_is(vh, coords, V1, "failing compareAndExchangeVolatile int value")?;

    let r = vh
        .compare_and_exchange_acquire(coords, V1, V2)
        .observe("success compareAndExchangeAcquire int")?;
    check_value("success compareAndExchangeAcquire int", r, V1)?;
    current_is(vh, coords, V2, "success compareAndExchangeAcquire int value")?;

    let r = vh
        .compare_and_exchange_acquire(coords, V1, V3)
        .observe("failing compareAndExchangeAcquire int")?;
    check_value("failing compareAndExchangeAcquire int", r, V2)?;
    current_is(vh, coords, V2, "failing compareAndExchangeAcquire int value")?;

    let r = vh
        .compare_and_exchange_release(coords, V2, V1)
        .observe("success compareAndExchangeRelease int")?;
    check_value("success compareAndExchangeRelease int", r, V2)?;
    current_is(vh, coords, V1, "success compareAndExchangeRelease int value")?;

    let r = vh
        .compare_and_exchange_release(coords, V2, V3)
        .observe("failing compareAndExchangeRelease int")?;
    check_value("failing compareAndExchangeRelease int", r, V1)?;
    current_is(vh, coords, V1, "failing compareAndExchangeRelease int value")?;

    // Weak
    retry_weak("weakCompareAndSet int", ctx.weak_attempts, || {
        vh.weak_compare_and_set(coords, V1, V2)
    })?;
    current_is(vh, coords, V2, "weakCompareAndSet int value")?;

    retry_weak("weakCompareAndSetAcquire int", ctx.weak_attempts, || {
        vh.weak_compare_and_set_acquire(coords, V2, V1)
    })?;
    current_is(vh, coords, V1, "weakCompareAndSetAcquire int value")?;

    retry_weak("weakCompareAndSetRelease int", ctx.weak_attempts, || {
        vh.weak_compare_and_set_release(coords, V1, V2)
    })?;
    current_is(vh, coords, V2, "weakCompareAndSetRelease int value")?;

    retry_weak("weakCompareAndSetVolatile int", ctx.weak_attempts, || {
        vh.weak_compare_and_set_volatile(coords, V2, V1)
    })?;
    current_is(vh, coords, V1, "weakCompareAndSetVolatile int value")?;

    // Compare set and get
    let o = vh.get_and_set(coords, V2).observe("getAndSet int")?;
    check_value("getAndSet int", o, V1)?;
    current_is(vh, coords, V2, "getAndSet int value")?;

    vh.set(coords, V1).observe("set int")?;

    // get and add, add and get
    let o = vh.get_and_add(coords, V3).observe("getAndAdd int")?;
    check_value("getAndAdd int", o, V1)?;
    let c = vh.add_and_get(coords, V3).observe("addAndGet int")?;
    check_value("getAndAdd int value", c, SEQUENCE_RESULT)
}

fn current_is(vh: &VarHandle, coords: &[Coordinate], expected: i32, what: &str) -> CheckResult {
    check_value(what, vh.get(coords).observe(what)?, expected)
}

/// Operands for invoking `mode` in a probe whose outcome must be an error
pub fn probe_operands(mode: AccessMode) -> Vec<i32> {
    match (mode.operand_count(), mode) {
        (0, _) => Vec::new(),
        (1, AccessMode::GetAndAdd | AccessMode::AddAndGet) => vec![V3],
        (1, _) => vec![V1],
        _ => vec![V1, V2],
    }
}

/// The capability set of `vh` is exactly the one its shape and mutability imply
pub fn capabilities_match(vh: &VarHandle, _ctx: &ScenarioContext) -> CheckResult {
    let expected = supported(vh.shape(), vh.mutability());
    for mode in AccessMode::ALL {
        check_flag(
            &format!("isAccessModeSupported {}", mode),
            vh.is_access_mode_supported(mode),
            expected.contains(mode),
        )?;
    }
    let expected_count = match vh.mutability() {
        Mutability::Final => 4,
        Mutability::Mutable => AccessMode::COUNT as i32,
    };
    check_value(
        "supported mode count",
        vh.supported_modes().len() as i32,
        expected_count,
    )
}
