//! Sources: the leaves every pipeline starts from.
//!
//! Each source re-produces its elements from scratch for every cursor.
//! `range` and `repeat` validate their counts eagerly.

use std::marker::PhantomData;

use crate::cursor::Terminating;
use crate::traits::{QueryConfig, SeqError, SeqResult, Sequence};

/// Owned elements, cloned out on every traversal.
#[derive(Debug, Clone)]
pub struct FromVec<T> {
    items: Vec<T>,
    config: QueryConfig,
}

pub fn from_vec<T: Clone>(items: Vec<T>) -> FromVec<T> {
    FromVec {
        items,
        config: QueryConfig::default(),
    }
}

impl<T> FromVec<T> {
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct VecCursor<'a, T> {
    iter: std::slice::Iter<'a, T>,
}

impl<'a, T: Clone> Iterator for VecCursor<'a, T> {
    type Item = SeqResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|v| Ok(v.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T: Clone> Sequence for FromVec<T> {
    type Item = T;
    type Cursor<'a> = VecCursor<'a, T> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        VecCursor {
            iter: self.items.iter(),
        }
    }

    fn config(&self) -> QueryConfig {
        self.config
    }
}

/// A producer closure invoked once per traversal. The returned iterator may
/// be infinite or hold resources; it is dropped when the cursor is.
#[derive(Clone)]
pub struct FromFn<F> {
    producer: F,
    config: QueryConfig,
}

pub fn from_fn<F, I>(producer: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FromFn {
        producer,
        config: QueryConfig::default(),
    }
}

impl<F> FromFn<F> {
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct OkCursor<I> {
    iter: I,
}

impl<I: Iterator> Iterator for OkCursor<I> {
    type Item = SeqResult<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(Ok)
    }
}

impl<F, I> Sequence for FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor<'a> = OkCursor<I::IntoIter> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        OkCursor {
            iter: (self.producer)().into_iter(),
        }
    }

    fn config(&self) -> QueryConfig {
        self.config
    }
}

/// Like `FromFn`, but the producer reports its own failures. The first
/// `Err` ends the traversal.
#[derive(Clone)]
pub struct FromFallibleFn<F> {
    producer: F,
    config: QueryConfig,
}

pub fn from_fallible_fn<F, I, T>(producer: F) -> FromFallibleFn<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = SeqResult<T>>,
{
    FromFallibleFn {
        producer,
        config: QueryConfig::default(),
    }
}

impl<F> FromFallibleFn<F> {
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }
}

impl<F, I, T> Sequence for FromFallibleFn<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = SeqResult<T>>,
{
    type Item = T;
    type Cursor<'a> = Terminating<I::IntoIter> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        Terminating::new((self.producer)().into_iter())
    }

    fn config(&self) -> QueryConfig {
        self.config
    }
}

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    start: i32,
    count: i32,
    config: QueryConfig,
}

pub fn range(start: i32, count: i32) -> SeqResult<Range> {
    if count < 0 {
        tracing::debug!(count, "range rejected negative count");
        return Err(SeqError::precondition("range", "count must be non-negative"));
    }
    if i64::from(start) + i64::from(count) - 1 > i64::from(i32::MAX) {
        tracing::debug!(start, count, "range rejected overflowing bounds");
        return Err(SeqError::precondition(
            "range",
            format!("start {start} + count {count} exceeds i32::MAX"),
        ));
    }
    Ok(Range {
        start,
        count,
        config: QueryConfig::default(),
    })
}

impl Range {
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct RangeCursor {
    next: i64,
    end: i64,
}

impl Iterator for RangeCursor {
    type Item = SeqResult<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let v = self.next;
        self.next += 1;
        // Bounds were checked at construction.
        Some(Ok(v as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next).max(0) as usize;
        (n, Some(n))
    }
}

impl Sequence for Range {
    type Item = i32;
    type Cursor<'a> = RangeCursor where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        RangeCursor {
            next: i64::from(self.start),
            end: i64::from(self.start) + i64::from(self.count),
        }
    }

    fn config(&self) -> QueryConfig {
        self.config
    }
}

/// The same value `count` times.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    count: u64,
    config: QueryConfig,
}

pub fn repeat<T: Clone>(value: T, count: i64) -> SeqResult<Repeat<T>> {
    if count < 0 {
        tracing::debug!(count, "repeat rejected negative count");
        return Err(SeqError::precondition(
            "repeat",
            "count must be non-negative",
        ));
    }
    Ok(Repeat {
        value,
        count: count as u64,
        config: QueryConfig::default(),
    })
}

impl<T> Repeat<T> {
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct RepeatCursor<'a, T> {
    value: &'a T,
    remaining: u64,
}

impl<'a, T: Clone> Iterator for RepeatCursor<'a, T> {
    type Item = SeqResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(Ok(self.value.clone()))
    }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Cursor<'a> = RepeatCursor<'a, T> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        RepeatCursor {
            value: &self.value,
            remaining: self.count,
        }
    }

    fn config(&self) -> QueryConfig {
        self.config
    }
}

/// No elements.
pub struct Empty<T> {
    config: QueryConfig,
    _marker: PhantomData<fn() -> T>,
}

pub fn empty<T>() -> Empty<T> {
    Empty {
        config: QueryConfig::default(),
        _marker: PhantomData,
    }
}

impl<T> Empty<T> {
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            _marker: PhantomData,
        }
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor<'a> = std::iter::Empty<SeqResult<T>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        std::iter::empty()
    }

    fn config(&self) -> QueryConfig {
        self.config
    }
}
