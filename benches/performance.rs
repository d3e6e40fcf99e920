use criterion::{criterion_group, criterion_main, Criterion};
use lazyq::prelude::*;

fn make_rows(n: usize) -> Vec<(String, i64, f64)> {
    (0..n)
        .map(|i| {
            (
                format!("group-{}", i % 16),
                (i as i64 * 7919) % 1000,
                (i % 10) as f64,
            )
        })
        .collect()
}

fn bench_order_by_then_by(c: &mut Criterion) {
    let rows = from_vec(make_rows(10_000));
    let sorted = (&rows)
        .order_by(|r| r.0.clone())
        .then_by_descending(|r| r.1);
    c.bench_function("order_by_then_by_10k", |b| {
        b.iter(|| {
            let _ = sorted.count().unwrap();
        })
    });
}

fn bench_group_by(c: &mut Criterion) {
    let rows = from_vec(make_rows(10_000));
    let sums = (&rows).group_by_result(
        |r| r.0.clone(),
        |r| r.2,
        |key, values: Vec<f64>| (key, values.iter().sum::<f64>()),
    );
    c.bench_function("group_by_sum_10k", |b| {
        b.iter(|| {
            let _ = sums.to_vec().unwrap();
        })
    });
}

fn bench_join(c: &mut Criterion) {
    let left = from_vec(make_rows(5_000));
    let right = from_vec((0..1000).map(|k| (k as i64, k * 2)).collect::<Vec<_>>());
    let joined = (&left).join(
        &right,
        |l| Some(l.1),
        |r| Some(r.0),
        |l: &(String, i64, f64), r: &(i64, i32)| l.2 + r.1 as f64,
    );
    c.bench_function("hash_join_5k_by_1k", |b| {
        b.iter(|| {
            let _ = joined.count().unwrap();
        })
    });
}

fn bench_distinct(c: &mut Criterion) {
    let keys = from_vec((0..20_000).map(|i| i % 3_000).collect::<Vec<i32>>());
    let unique = (&keys).distinct();
    c.bench_function("distinct_20k", |b| {
        b.iter(|| {
            let _ = unique.count().unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_order_by_then_by,
    bench_group_by,
    bench_join,
    bench_distinct
);
criterion_main!(benches);
