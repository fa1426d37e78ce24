//! Final handles reject writes and updates without touching storage

use crate::common::*;
use varaccess::{unsupported, AccessKind};

#[test]
fn test_typed_writes_on_final_field_fail() {
    let h = Holder::new();
    let (vh, c) = (&h.final_field, receiver(&h.recv));

    let errors = [
        vh.set(&c, V2).unwrap_err(),
        vh.set_volatile(&c, V2).unwrap_err(),
        vh.set_release(&c, V2).unwrap_err(),
        vh.set_opaque(&c, V2).unwrap_err(),
        vh.compare_and_set(&c, V1, V2).unwrap_err(),
        vh.weak_compare_and_set_acquire(&c, V1, V2).unwrap_err(),
        vh.compare_and_exchange_volatile(&c, V1, V2).unwrap_err(),
        vh.get_and_set(&c, V2).unwrap_err(),
        vh.get_and_add(&c, V3).unwrap_err(),
        vh.add_and_get(&c, V3).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation, "{}", err);
    }
    assert_eq!(vh.get(&c).unwrap(), V1);
}

#[test]
fn test_every_unsupported_mode_fails_and_leaves_value() {
    let h = Holder::new();
    let array = IntArray::new(1);
    for vh in h.final_handles() {
        let coords = h.coords_for(vh, &array, 0);
        let modes: Vec<_> = unsupported(vh.shape(), vh.mutability()).iter().collect();
        assert_eq!(modes.len(), AccessMode::COUNT - 4);
        for mode in modes {
            assert_ne!(mode.kind(), AccessKind::Read);
            let err = vh.invoke(mode, &coords, &operands_for(mode)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedOperation, "{} {}", vh, mode);
            assert_eq!(vh.get(&coords).unwrap(), V1);
        }
    }
}

#[test]
fn test_unsupported_message() {
    let h = Holder::new();
    let err = h.static_final_field.set_release(&no_coords(), V2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported operation: SET_RELEASE on final static field"
    );
}

#[test]
fn test_capability_checked_before_arguments() {
    let h = Holder::new();
    // Wrong operand count and missing receiver still report the capability violation.
    let err = h
        .final_field
        .invoke(AccessMode::CompareAndSet, &no_coords(), &[])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
}

#[test]
fn test_operand_count_mismatch() {
    let h = Holder::new();
    let err = h
        .field
        .invoke(AccessMode::GetAndAdd, &receiver(&h.recv), &[V1, V2])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
    assert_eq!(h.field.get(&receiver(&h.recv)).unwrap(), 0);
}
