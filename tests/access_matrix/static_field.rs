//! Static field handles

use crate::common::*;

#[test]
fn test_static_final_field_reads() {
    let h = Holder::new();
    let vh = &h.static_final_field;
    assert_eq!(vh.get(&no_coords()).unwrap(), V1);
    assert_eq!(vh.get_volatile(&no_coords()).unwrap(), V1);
    assert_eq!(vh.get_acquire(&no_coords()).unwrap(), V1);
    assert_eq!(vh.get_opaque(&no_coords()).unwrap(), V1);
}

#[test]
fn test_static_field_sequence() {
    let h = Holder::new();
    let vh = &h.static_field;
    let c = no_coords();

    vh.set(&c, V1).unwrap();
    assert_eq!(vh.get(&c).unwrap(), V1);
    vh.set_volatile(&c, V2).unwrap();
    assert_eq!(vh.get_volatile(&c).unwrap(), V2);
    vh.set_release(&c, V1).unwrap();
    assert_eq!(vh.get_acquire(&c).unwrap(), V1);
    vh.set_opaque(&c, V2).unwrap();
    assert_eq!(vh.get_opaque(&c).unwrap(), V2);

    vh.set(&c, V1).unwrap();
    assert!(vh.compare_and_set(&c, V1, V2).unwrap());
    assert!(!vh.compare_and_set(&c, V1, V3).unwrap());
    assert_eq!(vh.compare_and_exchange_volatile(&c, V2, V1).unwrap(), V2);
    assert_eq!(vh.compare_and_exchange_acquire(&c, V2, V3).unwrap(), V1);
    assert_eq!(vh.get(&c).unwrap(), V1);

    assert_eq!(vh.get_and_set(&c, V2).unwrap(), V1);
    vh.set(&c, V1).unwrap();
    assert_eq!(vh.get_and_add(&c, V3).unwrap(), V1);
    assert_eq!(
        vh.add_and_get(&c, V3).unwrap(),
        V1.wrapping_add(V3).wrapping_add(V3)
    );
}

#[test]
fn test_statics_belong_to_their_class() {
    let a = Holder::new();
    let b = Holder::new();
    a.static_field.set(&no_coords(), V3).unwrap();
    assert_eq!(b.static_field.get(&no_coords()).unwrap(), 0);
    assert_eq!(a.static_field.get(&no_coords()).unwrap(), V3);
}

#[test]
fn test_static_rejects_coordinates() {
    let h = Holder::new();
    let err = h.static_field.get(&receiver(&h.recv)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn test_invoke_outcomes() {
    use varaccess::AccessOutcome;

    let h = Holder::new();
    let vh = &h.static_field;
    assert_eq!(
        vh.invoke(AccessMode::Set, &no_coords(), &[V1]).unwrap(),
        AccessOutcome::Unit
    );
    assert_eq!(
        vh.invoke(AccessMode::CompareAndSet, &no_coords(), &[V1, V2]).unwrap(),
        AccessOutcome::Flag(true)
    );
    assert_eq!(
        vh.invoke(AccessMode::CompareAndExchangeRelease, &no_coords(), &[V1, V3])
            .unwrap(),
        AccessOutcome::Value(V2)
    );
    let outcome = vh.invoke(AccessMode::GetOpaque, &no_coords(), &[]).unwrap();
    assert_eq!(outcome.value(), Some(V2));
    assert_eq!(outcome.to_string(), "0x89ABCDEF");
}
