//! cast / of_type over heterogeneous records

use lazyq::prelude::*;
use std::any::Any;

fn mixed() -> Vec<Value> {
    vec![
        Value::I64(4),
        Value::Str("four".into()),
        Value::Null,
        Value::I64(-1),
        Value::F64(2.5),
    ]
}

#[test]
fn test_of_type_filters_by_tag() {
    let ints: Vec<i64> = from_vec(mixed()).of_type::<i64>().to_vec().unwrap();
    assert_eq!(ints, vec![4, -1]);

    let texts: Vec<String> = from_vec(mixed()).of_type::<String>().to_vec().unwrap();
    assert_eq!(texts, vec!["four".to_string()]);
}

#[test]
fn test_cast_fails_at_offending_element() {
    let casted = from_vec(mixed()).cast::<i64>();
    let mut cur = casted.cursor();
    assert_eq!(cur.next(), Some(Ok(4)));
    match cur.next() {
        Some(Err(SeqError::InvalidCast { expected, found })) => {
            assert_eq!(expected, "i64");
            assert_eq!(found, "string");
        }
        other => panic!("expected a cast error, got {other:?}"),
    }
    assert_eq!(cur.next(), None);
}

#[test]
fn test_nullable_cast() {
    let values = from_vec(vec![Value::I32(1), Value::Null, Value::I32(3)]);
    let maybe: Vec<Option<i32>> = values.cast::<Option<i32>>().to_vec().unwrap();
    assert_eq!(maybe, vec![Some(1), None, Some(3)]);
}

#[test]
fn test_cast_is_exact() {
    // An I32 is not an i64.
    let out = from_vec(vec![Value::I32(1)]).cast::<i64>().to_vec();
    assert!(matches!(out, Err(SeqError::InvalidCast { .. })));
}

#[test]
fn test_opaque_elements() {
    let boxed = from_fn(|| -> Vec<Box<dyn Any>> {
        vec![Box::new(1u8), Box::new("x"), Box::new(2u8)]
    });
    let bytes: Vec<u8> = boxed.of_type::<u8>().to_vec().unwrap();
    assert_eq!(bytes, vec![1, 2]);
}

#[test]
fn test_value_json_round_trip() {
    let values = mixed();
    let json = serde_json::to_string(&values).unwrap();
    let back: Vec<Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, values);
}
