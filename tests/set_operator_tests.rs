//! Set operator semantics over the natural and custom comparers

use lazyq::prelude::*;

fn sample() -> Vec<i32> {
    vec![5, 3, 5, 1, 3, 9, 1]
}

#[test]
fn test_distinct_is_idempotent() {
    let once = from_vec(sample()).distinct();
    let twice = from_vec(sample()).distinct().distinct();
    assert_eq!(once.to_vec().unwrap(), vec![5, 3, 1, 9]);
    assert!(once.sequence_equal(&twice).unwrap());
}

#[test]
fn test_union_keeps_first_seen_order() {
    let a = from_vec(vec![2, 1, 2]);
    let b = from_vec(vec![3, 1, 4, 3]);
    assert_eq!(a.union(b).to_vec().unwrap(), vec![2, 1, 3, 4]);
}

#[test]
fn test_except_and_intersect_partition_distinct() {
    let a = from_vec(sample());
    let b = from_vec(vec![3, 9, 42]);

    let kept = (&a).except(&b).to_vec().unwrap();
    let shared = (&a).intersect(&b).to_vec().unwrap();
    assert_eq!(kept, vec![5, 1]);
    assert_eq!(shared, vec![3, 9]);

    // Together they cover distinct(a) exactly once.
    let mut both: Vec<i32> = kept.iter().chain(shared.iter()).copied().collect();
    both.sort();
    let mut all = (&a).distinct().to_vec().unwrap();
    all.sort();
    assert_eq!(both, all);
}

#[test]
fn test_second_input_is_read_on_first_pull() {
    let b = from_fallible_fn(|| vec![Ok(1), Err(SeqError::Source("seed".into()))]);
    let query = from_vec(vec![1, 2]).except(&b);
    let mut cur = query.cursor();
    assert_eq!(cur.next(), Some(Err(SeqError::Source("seed".into()))));
    assert_eq!(cur.next(), None);
}

#[test]
fn test_case_insensitive_comparer() {
    let ci = || KeyedEquality::new(|s: &String| s.to_lowercase());
    let names = || from_vec(vec!["Ann".to_string(), "ann".to_string(), "Bob".to_string()]);

    assert_eq!(
        names().distinct_with(ci()).to_vec().unwrap(),
        vec!["Ann".to_string(), "Bob".to_string()]
    );
    assert_eq!(
        names()
            .intersect_with(from_vec(vec!["BOB".to_string()]), ci())
            .to_vec()
            .unwrap(),
        vec!["Bob".to_string()]
    );
}

#[test]
fn test_distinct_by_keeps_first_of_each_key() {
    let people = from_vec(vec![("ann", 31), ("bob", 31), ("cy", 20)]);
    assert_eq!(
        people.distinct_by(|p| p.1).to_vec().unwrap(),
        vec![("ann", 31), ("cy", 20)]
    );
}

#[test]
fn test_set_buffer_limit() {
    let limited = QueryConfig::default().with_buffer_limit(2);
    let src = from_vec(vec![1, 2, 1, 3]).with_config(limited);
    let out: Vec<_> = src.distinct().cursor().collect();
    assert_eq!(
        out,
        vec![
            Ok(1),
            Ok(2),
            Err(SeqError::BufferLimit {
                operator: "distinct",
                limit: 2
            })
        ]
    );
}

#[test]
fn test_intersect_yields_each_match_once() {
    let both = from_vec(vec![1, 1, 2, 2, 3])
        .intersect(from_vec(vec![2, 1, 1]))
        .to_vec()
        .unwrap();
    assert_eq!(both, vec![1, 2]);
}

#[test]
fn test_union_and_except_with_comparer() {
    let ci = || KeyedEquality::new(|s: &&str| s.to_lowercase());

    let merged = from_vec(vec!["Ann", "bob", "ANN"])
        .union_with(from_vec(vec!["BOB", "cy"]), ci())
        .to_vec()
        .unwrap();
    assert_eq!(merged, vec!["Ann", "bob", "cy"]);

    let left = from_vec(vec!["Ann", "bob", "Cy", "cy"])
        .except_with(from_vec(vec!["BOB"]), ci())
        .to_vec()
        .unwrap();
    assert_eq!(left, vec!["Ann", "Cy"]);
}

#[test]
fn test_distinct_by_with_comparer() {
    let words = from_vec(vec!["Apple", "apricot", "Berry", "banana", "cherry"]);
    let firsts = words
        .distinct_by_with(
            |w| w.chars().next().unwrap_or_default(),
            KeyedEquality::new(|c: &char| c.to_ascii_lowercase()),
        )
        .to_vec()
        .unwrap();
    assert_eq!(firsts, vec!["Apple", "Berry", "cherry"]);
}
