//! Instance field handles: literal sequence and receiver checks

use crate::common::*;

#[test]
fn test_final_field_reads() {
    let h = Holder::new();
    let c = receiver(&h.recv);
    assert_eq!(h.final_field.get(&c).unwrap(), V1);
    assert_eq!(h.final_field.get_volatile(&c).unwrap(), V1);
    assert_eq!(h.final_field.get_acquire(&c).unwrap(), V1);
    assert_eq!(h.final_field.get_opaque(&c).unwrap(), V1);
}

#[test]
fn test_plain_volatile_lazy_opaque() {
    let h = Holder::new();
    let (vh, c) = (&h.field, receiver(&h.recv));

    vh.set(&c, V1).unwrap();
    assert_eq!(vh.get(&c).unwrap(), V1, "set int value");
    vh.set_volatile(&c, V2).unwrap();
    assert_eq!(vh.get_volatile(&c).unwrap(), V2, "setVolatile int value");
    vh.set_release(&c, V1).unwrap();
    assert_eq!(vh.get_acquire(&c).unwrap(), V1, "setRelease int value");
    vh.set_opaque(&c, V2).unwrap();
    assert_eq!(vh.get_opaque(&c).unwrap(), V2, "setOpaque int value");
}

#[test]
fn test_compare_and_set_and_exchange() {
    let h = Holder::new();
    let (vh, c) = (&h.field, receiver(&h.recv));
    vh.set(&c, V1).unwrap();

    assert!(vh.compare_and_set(&c, V1, V2).unwrap());
    assert_eq!(vh.get(&c).unwrap(), V2);
    assert!(!vh.compare_and_set(&c, V1, V3).unwrap());
    assert_eq!(vh.get(&c).unwrap(), V2);

    assert_eq!(vh.compare_and_exchange_volatile(&c, V2, V1).unwrap(), V2);
    assert_eq!(vh.get(&c).unwrap(), V1);
    assert_eq!(vh.compare_and_exchange_volatile(&c, V2, V3).unwrap(), V1);
    assert_eq!(vh.get(&c).unwrap(), V1);

    assert_eq!(vh.compare_and_exchange_acquire(&c, V1, V2).unwrap(), V1);
    assert_eq!(vh.get(&c).unwrap(), V2);
    assert_eq!(vh.compare_and_exchange_acquire(&c, V1, V3).unwrap(), V2);
    assert_eq!(vh.get(&c).unwrap(), V2);

    assert_eq!(vh.compare_and_exchange_release(&c, V2, V1).unwrap(), V2);
    assert_eq!(vh.get(&c).unwrap(), V1);
    assert_eq!(vh.compare_and_exchange_release(&c, V2, V3).unwrap(), V1);
    assert_eq!(vh.get(&c).unwrap(), V1);
}

#[test]
fn test_weak_compare_and_set_within_budget() {
    let h = Holder::new();
    let (vh, c) = (&h.field, receiver(&h.recv));
    vh.set(&c, V1).unwrap();

    let weak: [(fn(&VarHandle, &[Coordinate], i32, i32) -> varaccess::Result<bool>, i32, i32); 4] = [
        (VarHandle::weak_compare_and_set, V1, V2),
        (VarHandle::weak_compare_and_set_acquire, V2, V1),
        (VarHandle::weak_compare_and_set_release, V1, V2),
        (VarHandle::weak_compare_and_set_volatile, V2, V1),
    ];
    for (op, expected, new) in weak {
        let success = (0..10).any(|_| op(vh, &c, expected, new).unwrap());
        assert!(success);
        assert_eq!(vh.get(&c).unwrap(), new);
    }
}

#[test]
fn test_get_and_set_then_adds_wrap() {
    let h = Holder::new();
    let (vh, c) = (&h.field, receiver(&h.recv));
    vh.set(&c, V1).unwrap();

    assert_eq!(vh.get_and_set(&c, V2).unwrap(), V1);
    assert_eq!(vh.get(&c).unwrap(), V2);

    vh.set(&c, V1).unwrap();
    assert_eq!(vh.get_and_add(&c, V3).unwrap(), V1);
    let sum = vh.add_and_get(&c, V3).unwrap();
    assert_eq!(sum as u32, 0x01234567u32.wrapping_add(0xCAFEBABE).wrapping_add(0xCAFEBABE));
    assert_eq!(vh.get(&c).unwrap(), sum);
}

#[test]
fn test_receivers_are_independent() {
    let h = Holder::new();
    let other = Instance::new(&h.class);
    h.field.set(&receiver(&h.recv), V3).unwrap();
    assert_eq!(h.field.get(&receiver(&other)).unwrap(), 0);
}

#[test]
fn test_receiver_of_wrong_class() {
    let h = Holder::new();
    let stranger = Holder::new();
    let err = h.field.get(&receiver(&stranger.recv)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn test_missing_or_wrong_coordinates() {
    let h = Holder::new();
    assert_eq!(
        h.field.get(&no_coords()).unwrap_err().kind(),
        ErrorKind::IllegalArgument
    );
    let array = IntArray::new(1);
    assert_eq!(
        h.field.set(&[Coordinate::from(&array)], V1).unwrap_err().kind(),
        ErrorKind::IllegalArgument
    );
}
