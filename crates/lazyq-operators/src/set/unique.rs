//! Hash-based membership set with a pluggable equality comparer.
//!
//! Buckets are keyed by the comparer's hash; each bucket holds the (rare)
//! distinct elements that collide on it. One set lives inside one cursor
//! and is discarded with it.

use std::collections::HashMap;

use lazyq_core::comparer::EqualityComparer;
use lazyq_core::config::{BufferBudget, QueryConfig};

use crate::metrics;
use crate::traits::SeqResult;

pub struct UniquenessSet<T, C> {
    buckets: HashMap<u64, Vec<T>>,
    len: usize,
    comparer: C,
}

impl<T, C: EqualityComparer<T>> UniquenessSet<T, C> {
    pub fn new(comparer: C) -> Self {
        Self::with_capacity(0, comparer)
    }

    pub fn with_capacity(capacity: usize, comparer: C) -> Self {
        Self {
            buckets: HashMap::with_capacity(capacity),
            len: 0,
            comparer,
        }
    }

    /// Pre-load every distinct element of `items`. Stops at the first
    /// upstream error or when the budget is exceeded.
    pub fn seeded<I>(
        items: I,
        comparer: C,
        config: &QueryConfig,
        budget: BufferBudget,
    ) -> SeqResult<Self>
    where
        I: Iterator<Item = SeqResult<T>>,
    {
        let mut set = Self::with_capacity(config.initial_capacity(), comparer);
        for step in items {
            let added = step.and_then(|item| {
                if set.try_add(item) {
                    budget.admit(set.len())?;
                }
                Ok(())
            });
            if let Err(e) = added {
                metrics::aborted(budget.operator(), set.len(), &e);
                return Err(e);
            }
        }
        metrics::materialized(budget.operator(), set.len());
        Ok(set)
    }

    /// Insert `item` unless an equal element is present. True iff inserted.
    pub fn try_add(&mut self, item: T) -> bool {
        let hash = self.comparer.hash(&item);
        let bucket = self.buckets.entry(hash).or_default();
        if bucket.iter().any(|held| self.comparer.equals(held, &item)) {
            return false;
        }
        bucket.push(item);
        self.len += 1;
        true
    }

    /// Remove the element equal to `item`. True iff one was present.
    pub fn remove(&mut self, item: &T) -> bool {
        let hash = self.comparer.hash(item);
        let Some(bucket) = self.buckets.get_mut(&hash) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|held| self.comparer.equals(held, item)) else {
            return false;
        };
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.len -= 1;
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.buckets
            .get(&self.comparer.hash(item))
            .is_some_and(|bucket| bucket.iter().any(|held| self.comparer.equals(held, item)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
