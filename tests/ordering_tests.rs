//! Stable multi-key ordering

use lazyq::prelude::*;
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    dept: &'static str,
    age: u32,
    name: &'static str,
}

fn row(dept: &'static str, age: u32, name: &'static str) -> Row {
    Row { dept, age, name }
}

fn rows() -> Vec<Row> {
    vec![
        row("ops", 40, "kai"),
        row("dev", 31, "lee"),
        row("ops", 25, "max"),
        row("dev", 31, "abe"),
        row("dev", 22, "zoe"),
    ]
}

fn names(seq: &impl Sequence<Item = Row>) -> Vec<&'static str> {
    seq.cursor().map(|r| r.unwrap().name).collect()
}

#[test]
fn test_then_by_breaks_primary_ties() {
    let sorted = from_vec(rows())
        .order_by(|r| r.dept)
        .then_by_descending(|r| r.age);
    assert_eq!(names(&sorted), vec!["lee", "abe", "zoe", "kai", "max"]);
}

#[test]
fn test_full_ties_keep_source_order() {
    // "lee" and "abe" tie on both keys.
    let sorted = from_vec(rows())
        .order_by_descending(|r| r.dept)
        .then_by(|r| r.age)
        .then_by(|r| r.dept.len());
    assert_eq!(names(&sorted), vec!["max", "kai", "zoe", "lee", "abe"]);
}

#[test]
fn test_three_layers() {
    let sorted = from_vec(rows())
        .order_by(|r| r.dept)
        .then_by(|r| r.age)
        .then_by_descending(|r| r.name);
    assert_eq!(names(&sorted), vec!["zoe", "lee", "abe", "max", "kai"]);
}

#[test]
fn test_custom_key_comparer() {
    let by_len_then_text = FnOrder::new(|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
    let sorted = from_vec(vec!["pear", "fig", "apple", "kiwi"])
        .order_by_with(|s| *s, by_len_then_text)
        .to_vec()
        .unwrap();
    assert_eq!(sorted, vec!["fig", "kiwi", "pear", "apple"]);

    let floats = from_vec(vec![0.5, -2.0, 3.25])
        .order_by_descending_with(|x| *x, FnOrder::new(|a: &f64, b: &f64| a.total_cmp(b)))
        .to_vec()
        .unwrap();
    assert_eq!(floats, vec![3.25, 0.5, -2.0]);
}

#[test]
fn test_keys_projected_once_per_traversal() {
    let projections = Cell::new(0);
    let p = &projections;
    let sorted = from_vec(rows()).order_by(move |r| {
        p.set(p.get() + 1);
        r.age
    });
    assert_eq!(sorted.first().unwrap().name, "zoe");
    assert_eq!(projections.get(), 5);
    assert_eq!(sorted.count().unwrap(), 5);
    assert_eq!(projections.get(), 10);
}

#[test]
fn test_ordered_feeds_later_operators() {
    let oldest_two: Vec<u32> = from_vec(rows())
        .order_by_descending(|r| r.age)
        .select(|r| r.age)
        .take(2)
        .to_vec()
        .unwrap();
    assert_eq!(oldest_two, vec![40, 31]);
}
