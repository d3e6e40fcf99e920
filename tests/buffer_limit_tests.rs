//! QueryConfig threading and buffer limit enforcement

use lazyq::prelude::*;
use std::collections::HashMap;

fn limited(limit: usize) -> QueryConfig {
    QueryConfig::default().with_buffer_limit(limit)
}

#[test]
fn test_config_travels_through_operators() {
    let cfg = limited(3).with_capacity_hint(2);
    let query = from_vec(vec![1, 2, 3])
        .with_config(cfg)
        .select(|x| x + 1)
        .filter(|x| *x > 0)
        .concat(from_vec(vec![9]));
    assert_eq!(query.config(), cfg);
}

#[test]
fn test_every_buffering_stage_is_capped() {
    let src = || from_vec(vec![4, 3, 2, 1]).with_config(limited(3));

    let sort = src().order_by(|x| *x).to_vec();
    assert_eq!(
        sort,
        Err(SeqError::BufferLimit {
            operator: "order_by",
            limit: 3
        })
    );

    let rev = src().reverse().to_vec();
    assert!(matches!(rev, Err(SeqError::BufferLimit { operator: "reverse", .. })));

    let group = src().group_by(|x| *x).to_vec();
    assert!(matches!(group, Err(SeqError::BufferLimit { operator: "group_by", .. })));

    let lookup = src().to_lookup(|x| *x, |x| x);
    assert!(matches!(lookup, Err(SeqError::BufferLimit { operator: "to_lookup", .. })));

    // The seed of `except` is the second input, budgeted by the first's config.
    let seeded = src().except(from_vec(vec![1, 2, 3, 4])).to_vec();
    assert!(matches!(seeded, Err(SeqError::BufferLimit { operator: "except", .. })));
}

#[test]
fn test_streaming_stages_ignore_the_cap() {
    let out = from_vec((0..100).collect::<Vec<i32>>())
        .with_config(limited(1))
        .select(|x| x * 2)
        .skip(10)
        .take(5)
        .to_vec()
        .unwrap();
    assert_eq!(out, vec![20, 22, 24, 26, 28]);
}

#[test]
fn test_within_limit_succeeds() {
    let ok = from_vec(vec![2, 1, 2])
        .with_config(limited(3))
        .order_by(|x| *x)
        .to_vec()
        .unwrap();
    assert_eq!(ok, vec![1, 2, 2]);
}

#[test]
fn test_config_from_variables() {
    let vars: HashMap<&str, &str> = [("LAZYQ_BUFFER_LIMIT", "500"), ("LAZYQ_CAPACITY_HINT", " 8 ")]
        .into_iter()
        .collect();
    let cfg = QueryConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
    assert_eq!(cfg.buffer_limit, Some(500));
    assert_eq!(cfg.capacity_hint, 8);

    let fallback = QueryConfig::from_lookup(|_| Some("not a number".to_string()));
    assert_eq!(fallback, QueryConfig::default());
}

#[test]
fn test_config_json_round_trip() {
    let cfg = limited(64);
    let json = serde_json::to_string(&cfg).unwrap();
    let back: QueryConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_except_caps_growth_past_the_seed() {
    // One seeded element, then every new first-side element joins the set.
    let out: Vec<_> = from_vec((0..10).collect::<Vec<i32>>())
        .with_config(limited(3))
        .except(from_vec(vec![100]))
        .cursor()
        .collect();
    assert_eq!(
        out,
        vec![
            Ok(0),
            Ok(1),
            Err(SeqError::BufferLimit {
                operator: "except",
                limit: 3
            })
        ]
    );
}

#[test]
fn test_intersect_only_shrinks_its_seed() {
    let out = from_vec((0..10).collect::<Vec<i32>>())
        .with_config(limited(3))
        .intersect(from_vec(vec![8, 2]))
        .to_vec()
        .unwrap();
    assert_eq!(out, vec![2, 8]);
}
