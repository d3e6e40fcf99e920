//! Immediate reductions. Each one starts its own traversal and pulls only as
//! far as it needs to.

use crate::traits::{SeqError, SeqResult, Sequence};

pub fn to_vec<S: Sequence>(seq: &S) -> SeqResult<Vec<S::Item>> {
    seq.cursor().collect()
}

pub fn count<S: Sequence>(seq: &S) -> SeqResult<usize> {
    let mut n = 0usize;
    for step in seq.cursor() {
        step?;
        n = n
            .checked_add(1)
            .ok_or(SeqError::Overflow { operator: "count" })?;
    }
    Ok(n)
}

pub fn first<S: Sequence>(seq: &S) -> SeqResult<S::Item> {
    match seq.cursor().next() {
        Some(step) => step,
        None => Err(SeqError::NoElements { operator: "first" }),
    }
}

pub fn first_or_default<S>(seq: &S) -> SeqResult<S::Item>
where
    S: Sequence,
    S::Item: Default,
{
    seq.cursor().next().unwrap_or_else(|| Ok(S::Item::default()))
}

pub fn last<S: Sequence>(seq: &S) -> SeqResult<S::Item> {
    let mut last = None;
    for step in seq.cursor() {
        last = Some(step?);
    }
    last.ok_or(SeqError::NoElements { operator: "last" })
}

/// Stops at the first match.
pub fn contains<S>(seq: &S, needle: &S::Item) -> SeqResult<bool>
where
    S: Sequence,
    S::Item: PartialEq,
{
    for step in seq.cursor() {
        if step? == *needle {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Pairwise equality; stops at the first mismatch or length difference.
pub fn sequence_equal<A, B>(a: &A, b: &B) -> SeqResult<bool>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: PartialEq,
{
    let mut left = a.cursor();
    let mut right = b.cursor();
    loop {
        match (left.next().transpose()?, right.next().transpose()?) {
            (Some(x), Some(y)) if x == y => continue,
            (None, None) => return Ok(true),
            _ => return Ok(false),
        }
    }
}

/// Smallest element. NaN counts as smaller than every number, so one NaN
/// anywhere makes the result NaN.
pub fn min_f64<S: Sequence<Item = f64>>(seq: &S) -> SeqResult<f64> {
    let mut cursor = seq.cursor();
    let mut best = match cursor.next() {
        Some(step) => step?,
        None => return Err(SeqError::NoElements { operator: "min_f64" }),
    };
    if best.is_nan() {
        return Ok(best);
    }
    for step in cursor {
        let x = step?;
        if x.is_nan() {
            return Ok(x);
        }
        if x < best {
            best = x;
        }
    }
    Ok(best)
}

/// Largest element. NaN is skipped unless every element is NaN.
pub fn max_f64<S: Sequence<Item = f64>>(seq: &S) -> SeqResult<f64> {
    let mut best: Option<f64> = None;
    for step in seq.cursor() {
        let x = step?;
        best = match best {
            None => Some(x),
            Some(b) if b.is_nan() || x > b => Some(x),
            keep => keep,
        };
    }
    best.ok_or(SeqError::NoElements { operator: "max_f64" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{empty, from_fallible_fn, from_fn, from_vec};
    use std::cell::Cell;

    #[test]
    fn test_first_pulls_one_element() {
        let counter = Cell::new(0);
        let pulled = &counter;
        let seq = from_fn(move || (1..).inspect(move |_| pulled.set(pulled.get() + 1)));
        assert_eq!(first(&seq), Ok(1));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_empty_boundaries() {
        let none = empty::<i32>();
        assert_eq!(first(&none), Err(SeqError::NoElements { operator: "first" }));
        assert_eq!(last(&none), Err(SeqError::NoElements { operator: "last" }));
        assert_eq!(first_or_default(&none), Ok(0));
        assert_eq!(count(&none), Ok(0));
        assert_eq!(to_vec(&none), Ok(vec![]));
    }

    #[test]
    fn test_count_last_contains() {
        let seq = from_vec(vec![3, 1, 2, 1]);
        assert_eq!(count(&seq), Ok(4));
        assert_eq!(last(&seq), Ok(1));
        assert_eq!(contains(&seq, &2), Ok(true));
        assert_eq!(contains(&seq, &9), Ok(false));
    }

    #[test]
    fn test_sequence_equal() {
        let a = from_vec(vec![1, 2, 3]);
        assert_eq!(sequence_equal(&a, &from_vec(vec![1, 2, 3])), Ok(true));
        assert_eq!(sequence_equal(&a, &from_vec(vec![1, 2])), Ok(false));
        assert_eq!(sequence_equal(&a, &from_vec(vec![1, 5, 3])), Ok(false));
        assert_eq!(sequence_equal(&empty::<i32>(), &empty::<i32>()), Ok(true));
    }

    #[test]
    fn test_errors_propagate() {
        let bad = from_fallible_fn(|| vec![Ok(1), Err(SeqError::Source("eof".into()))]);
        assert_eq!(count(&bad), Err(SeqError::Source("eof".into())));
        assert_eq!(to_vec(&bad), Err(SeqError::Source("eof".into())));
        assert_eq!(first(&bad), Ok(1));
    }

    #[test]
    fn test_nan_asymmetry() {
        let with_nan = from_vec(vec![2.0, f64::NAN, -1.0]);
        assert!(min_f64(&with_nan).unwrap().is_nan());
        assert_eq!(max_f64(&with_nan), Ok(2.0));

        let leading_nan = from_vec(vec![f64::NAN, 0.5]);
        assert_eq!(max_f64(&leading_nan), Ok(0.5));

        let all_nan = from_vec(vec![f64::NAN, f64::NAN]);
        assert!(max_f64(&all_nan).unwrap().is_nan());

        assert_eq!(min_f64(&from_vec(vec![4.0, -3.5, 1.0])), Ok(-3.5));
        assert_eq!(
            max_f64(&empty::<f64>()),
            Err(SeqError::NoElements { operator: "max_f64" })
        );
    }
}
