//! Property tests over arbitrary bit patterns and indices

use crate::common::*;
use proptest::prelude::*;

#[test]
fn test_boundary_patterns_round_trip() {
    let h = Holder::new();
    let array = IntArray::new(4);
    for vh in h.mutable_handles() {
        let coords = h.coords_for(vh, &array, 2);
        for value in BOUNDARY_PATTERNS {
            vh.set(&coords, value).unwrap();
            assert_eq!(vh.get(&coords).unwrap(), value, "{} {:#X}", vh, value);
        }
    }
}

proptest! {
    #[test]
    fn prop_set_then_get_returns_value(value in any::<i32>(), index in 0i32..8) {
        let h = Holder::new();
        let array = IntArray::new(8);
        for vh in h.mutable_handles() {
            let coords = h.coords_for(vh, &array, index);
            vh.set_volatile(&coords, value).unwrap();
            prop_assert_eq!(vh.get(&coords).unwrap(), value);
            vh.set_opaque(&coords, value.wrapping_neg()).unwrap();
            prop_assert_eq!(vh.get_acquire(&coords).unwrap(), value.wrapping_neg());
        }
    }

    #[test]
    fn prop_adds_wrap(start in any::<i32>(), delta in any::<i32>()) {
        let h = Holder::new();
        let c = receiver(&h.recv);
        h.field.set(&c, start).unwrap();
        prop_assert_eq!(h.field.get_and_add(&c, delta).unwrap(), start);
        prop_assert_eq!(
            h.field.add_and_get(&c, delta).unwrap(),
            start.wrapping_add(delta).wrapping_add(delta)
        );
    }

    #[test]
    fn prop_compare_and_exchange_witness(current in any::<i32>(), expected in any::<i32>(), new in any::<i32>()) {
        let h = Holder::new();
        let c = no_coords();
        h.static_field.set(&c, current).unwrap();
        let witness = h.static_field.compare_and_exchange_volatile(&c, expected, new).unwrap();
        prop_assert_eq!(witness, current);
        let after = h.static_field.get(&c).unwrap();
        prop_assert_eq!(after, if current == expected { new } else { current });
    }

    #[test]
    fn prop_compare_and_set_flag(current in any::<i32>(), expected in any::<i32>()) {
        let h = Holder::new();
        let c = no_coords();
        h.static_field.set(&c, current).unwrap();
        let ok = h.static_field.compare_and_set(&c, expected, !current).unwrap();
        prop_assert_eq!(ok, current == expected);
        prop_assert_eq!(h.static_field.get(&c).unwrap(), if ok { !current } else { current });
    }

    #[test]
    fn prop_out_of_range_index_fails(index in prop_oneof![i32::MIN..0i32, 6i32..=i32::MAX]) {
        let h = Holder::new();
        let array = IntArray::new(6);
        let err = h.array.get_and_set(&element(&array, index), V1).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
        prop_assert!(array.snapshot().iter().all(|&v| v == 0));
    }
}
