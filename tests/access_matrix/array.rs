//! Array element handles: per-index sequence and bounds

use crate::common::*;

const LENGTH: usize = 10;

#[test]
fn test_sequence_on_every_index() {
    let h = Holder::new();
    let vh = &h.array;
    let array = IntArray::new(LENGTH);

    for i in 0..LENGTH as i32 {
        let c = element(&array, i);
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
        assert_eq!(vh.compare_and_exchange_release(&c, V2, V1).unwrap(), V2);
        assert_eq!(vh.get_and_set(&c, V2).unwrap(), V1);

        vh.set(&c, V1).unwrap();
        assert_eq!(vh.get_and_add(&c, V3).unwrap(), V1);
        assert_eq!(vh.add_and_get(&c, V3).unwrap(), V1.wrapping_add(V3).wrapping_add(V3));
    }

    let expected = V1.wrapping_add(V3).wrapping_add(V3);
    assert!(array.snapshot().iter().all(|&v| v == expected));
}

#[test]
fn test_writes_touch_only_their_index() {
    let h = Holder::new();
    let array = IntArray::new(LENGTH);
    h.array.set(&element(&array, 3), V3).unwrap();
    let snapshot = array.snapshot();
    for (i, v) in snapshot.iter().enumerate() {
        assert_eq!(*v, if i == 3 { V3 } else { 0 }, "index {}", i);
    }
}

#[test]
fn test_every_mode_out_of_bounds() {
    let h = Holder::new();
    let array = IntArray::from_values(&[V1; LENGTH]);
    let before = array.snapshot();

    for index in [-1, i32::MIN, LENGTH as i32, LENGTH as i32 + 1, i32::MAX] {
        for mode in AccessMode::ALL {
            let err = h
                .array
                .invoke(mode, &element(&array, index), &operands_for(mode))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds, "{} at {}", mode, index);
            assert_eq!(array.snapshot(), before);
        }
    }
}

#[test]
fn test_out_of_bounds_error_reports_index_and_length() {
    let h = Holder::new();
    let array = IntArray::new(LENGTH);
    let err = h.array.get(&element(&array, 10)).unwrap_err();
    assert_eq!(err, varaccess::Error::IndexOutOfBounds { index: 10, length: 10 });
    assert_eq!(err.to_string(), "Index out of bounds: index 10, length 10");
}

#[test]
fn test_empty_array_has_no_valid_index() {
    let h = Holder::new();
    let array = IntArray::new(0);
    let err = h.array.get(&element(&array, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
}

#[test]
fn test_coordinates_in_wrong_order() {
    let h = Holder::new();
    let array = IntArray::new(LENGTH);
    let coords = [Coordinate::Index(0), Coordinate::Array(array)];
    assert_eq!(
        h.array.get(&coords).unwrap_err().kind(),
        ErrorKind::IllegalArgument
    );
}

#[test]
fn test_one_handle_serves_many_arrays() {
    let h = Holder::new();
    let a = IntArray::new(2);
    let b = IntArray::new(2);
    h.array.set(&element(&a, 1), V2).unwrap();
    assert_eq!(h.array.get(&element(&b, 1)).unwrap(), 0);
    assert_eq!(h.array.get(&element(&a, 1)).unwrap(), V2);
}
