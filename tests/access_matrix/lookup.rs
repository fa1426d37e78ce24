//! Lookup never rebinds across the instance/static boundary

use crate::common::*;

#[test]
fn test_lookup_instance_to_static() {
    let h = Holder::new();
    let lookup = Lookup::new();
    for name in ["final_v", "v"] {
        let err = lookup
            .find_static_var_handle(&h.class, name, VarType::Int)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Binding, "{}", name);
        assert!(err.to_string().contains("is instance, requested static"), "{}", err);
    }
}

#[test]
fn test_lookup_static_to_instance() {
    let h = Holder::new();
    let lookup = Lookup::new();
    for name in ["static_final_v", "static_v"] {
        let err = lookup.find_var_handle(&h.class, name, VarType::Int).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Binding, "{}", name);
    }
}

#[test]
fn test_unknown_field() {
    let h = Holder::new();
    let err = Lookup::new()
        .find_static_var_handle(&h.class, "missing", VarType::Int)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Binding);
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_lookup_carries_declared_mutability() {
    let h = Holder::new();
    assert_eq!(h.final_field.mutability(), Mutability::Final);
    assert_eq!(h.field.mutability(), Mutability::Mutable);
    assert_eq!(h.static_final_field.mutability(), Mutability::Final);
    assert_eq!(h.static_field.mutability(), Mutability::Mutable);
    assert_eq!(h.array.mutability(), Mutability::Mutable);
}

#[test]
fn test_handles_for_same_field_share_storage() {
    let h = Holder::new();
    let again = Lookup::new()
        .find_var_handle(&h.class, "v", VarType::Int)
        .unwrap();
    h.field.set(&receiver(&h.recv), V2).unwrap();
    assert_eq!(again.get(&receiver(&h.recv)).unwrap(), V2);
}
