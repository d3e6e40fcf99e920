//! Set operators built on `UniquenessSet`: `distinct`, `distinct_by`,
//! `union`, `except`, `intersect`.
//!
//! `except` and `intersect` seed their set from the whole second input on
//! the first pull, then stream the first input.

use lazyq_core::comparer::EqualityComparer;
use lazyq_core::config::BufferBudget;

use super::unique::UniquenessSet;
use crate::metrics;
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Distinct<S, C> {
    source: S,
    comparer: C,
}

impl<S, C> Distinct<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Self { source, comparer }
    }
}

pub struct DistinctCursor<'a, S: Sequence + 'a, C> {
    inner: S::Cursor<'a>,
    seen: UniquenessSet<S::Item, &'a C>,
    budget: BufferBudget,
    done: bool,
}

impl<'a, S, C> Iterator for DistinctCursor<'a, S, C>
where
    S: Sequence + 'a,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let item = match self.inner.next()? {
                Ok(item) => item,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            if self.seen.try_add(item.clone()) {
                if let Err(e) = self.budget.admit(self.seen.len()) {
                    self.done = true;
                    return Some(Err(e));
                }
                return Some(Ok(item));
            }
        }
    }
}

impl<S, C> Sequence for Distinct<S, C>
where
    S: Sequence,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;
    type Cursor<'a> = DistinctCursor<'a, S, C> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        let config = self.source.config();
        DistinctCursor {
            inner: self.source.cursor(),
            seen: UniquenessSet::with_capacity(config.initial_capacity(), &self.comparer),
            budget: config.budget("distinct"),
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// First element for each distinct projected key.
#[derive(Clone)]
pub struct DistinctBy<S, F, C> {
    source: S,
    key: F,
    comparer: C,
}

impl<S, F, C> DistinctBy<S, F, C> {
    pub fn new(source: S, key: F, comparer: C) -> Self {
        Self {
            source,
            key,
            comparer,
        }
    }
}

pub struct DistinctByCursor<'a, S: Sequence + 'a, F, K, C> {
    inner: S::Cursor<'a>,
    key: &'a F,
    seen: UniquenessSet<K, &'a C>,
    budget: BufferBudget,
    done: bool,
}

impl<'a, S, F, K, C> Iterator for DistinctByCursor<'a, S, F, K, C>
where
    S: Sequence + 'a,
    F: Fn(&S::Item) -> K,
    C: EqualityComparer<K>,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let item = match self.inner.next()? {
                Ok(item) => item,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            if self.seen.try_add((self.key)(&item)) {
                if let Err(e) = self.budget.admit(self.seen.len()) {
                    self.done = true;
                    return Some(Err(e));
                }
                return Some(Ok(item));
            }
        }
    }
}

impl<S, F, K, C> Sequence for DistinctBy<S, F, C>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    C: EqualityComparer<K>,
{
    type Item = S::Item;
    type Cursor<'a> = DistinctByCursor<'a, S, F, K, C> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        let config = self.source.config();
        DistinctByCursor {
            inner: self.source.cursor(),
            key: &self.key,
            seen: UniquenessSet::with_capacity(config.initial_capacity(), &self.comparer),
            budget: config.budget("distinct_by"),
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// Distinct elements of `first`, then those of `second` not yet seen.
#[derive(Clone)]
pub struct Union<A, B, C> {
    first: A,
    second: B,
    comparer: C,
}

impl<A, B, C> Union<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

enum UnionSide<'a, A: Sequence + 'a, B: Sequence + 'a> {
    First(A::Cursor<'a>),
    Second(B::Cursor<'a>),
    Done,
}

pub struct UnionCursor<'a, A: Sequence + 'a, B: Sequence + 'a, C> {
    side: UnionSide<'a, A, B>,
    second: &'a B,
    seen: UniquenessSet<A::Item, &'a C>,
    budget: BufferBudget,
}

impl<'a, A, B, C> Iterator for UnionCursor<'a, A, B, C>
where
    A: Sequence + 'a,
    B: Sequence<Item = A::Item> + 'a,
    A::Item: Clone,
    C: EqualityComparer<A::Item>,
{
    type Item = SeqResult<A::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match &mut self.side {
                UnionSide::First(cur) => match cur.next() {
                    None => {
                        self.side = UnionSide::Second(self.second.cursor());
                        continue;
                    }
                    step => step,
                },
                UnionSide::Second(cur) => cur.next(),
                UnionSide::Done => return None,
            };
            let outcome = match step {
                Some(Ok(item)) => {
                    if !self.seen.try_add(item.clone()) {
                        continue;
                    }
                    self.budget.admit(self.seen.len()).map(|_| item)
                }
                Some(Err(e)) => Err(e),
                None => {
                    self.side = UnionSide::Done;
                    return None;
                }
            };
            if outcome.is_err() {
                self.side = UnionSide::Done;
            }
            return Some(outcome);
        }
    }
}

impl<A, B, C> Sequence for Union<A, B, C>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Clone,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor<'a> = UnionCursor<'a, A, B, C> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        let config = self.first.config();
        UnionCursor {
            side: UnionSide::First(self.first.cursor()),
            second: &self.second,
            seen: UniquenessSet::with_capacity(config.initial_capacity(), &self.comparer),
            budget: config.budget("union"),
        }
    }

    fn config(&self) -> QueryConfig {
        self.first.config()
    }
}

/// Shared cursor state for the two seeded operators.
struct Seeded<'a, A: Sequence + 'a, B: Sequence + 'a, C> {
    first: &'a A,
    second: &'a B,
    comparer: &'a C,
    config: QueryConfig,
    budget: BufferBudget,
    // Populated on first pull.
    running: Option<(A::Cursor<'a>, UniquenessSet<A::Item, &'a C>)>,
    done: bool,
}

impl<'a, A, B, C> Seeded<'a, A, B, C>
where
    A: Sequence + 'a,
    B: Sequence<Item = A::Item> + 'a,
    C: EqualityComparer<A::Item>,
{
    fn new(first: &'a A, second: &'a B, comparer: &'a C, operator: &'static str) -> Self {
        let config = first.config();
        Self {
            first,
            second,
            comparer,
            config,
            budget: config.budget(operator),
            running: None,
            done: false,
        }
    }

    /// Pull the next first-side element for which `keep` says yes. An error
    /// from `keep` ends the traversal.
    fn next_matching(
        &mut self,
        mut keep: impl FnMut(
            &mut UniquenessSet<A::Item, &'a C>,
            &BufferBudget,
            &A::Item,
        ) -> SeqResult<bool>,
    ) -> Option<SeqResult<A::Item>> {
        if self.done {
            return None;
        }
        if self.running.is_none() {
            let seeded = UniquenessSet::seeded(
                self.second.cursor(),
                self.comparer,
                &self.config,
                self.budget,
            );
            match seeded {
                Ok(set) => self.running = Some((self.first.cursor(), set)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        let budget = self.budget;
        let (cursor, set) = self.running.as_mut()?;
        loop {
            let failed = match cursor.next() {
                Some(Ok(item)) => match keep(set, &budget, &item) {
                    Ok(true) => return Some(Ok(item)),
                    Ok(false) => continue,
                    Err(e) => {
                        metrics::aborted(budget.operator(), set.len(), &e);
                        e
                    }
                },
                Some(Err(e)) => e,
                None => {
                    self.done = true;
                    self.running = None;
                    return None;
                }
            };
            self.done = true;
            self.running = None;
            return Some(Err(failed));
        }
    }
}

/// Distinct elements of `first` that do not appear in `second`.
#[derive(Clone)]
pub struct Except<A, B, C> {
    first: A,
    second: B,
    comparer: C,
}

impl<A, B, C> Except<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

pub struct ExceptCursor<'a, A: Sequence + 'a, B: Sequence + 'a, C> {
    state: Seeded<'a, A, B, C>,
}

impl<'a, A, B, C> Iterator for ExceptCursor<'a, A, B, C>
where
    A: Sequence + 'a,
    B: Sequence<Item = A::Item> + 'a,
    A::Item: Clone,
    C: EqualityComparer<A::Item>,
{
    type Item = SeqResult<A::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        // Yielded elements join the set, so it grows past the seed.
        self.state.next_matching(|set, budget, item| {
            if !set.try_add(item.clone()) {
                return Ok(false);
            }
            budget.admit(set.len())?;
            Ok(true)
        })
    }
}

impl<A, B, C> Sequence for Except<A, B, C>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Clone,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor<'a> = ExceptCursor<'a, A, B, C> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ExceptCursor {
            state: Seeded::new(&self.first, &self.second, &self.comparer, "except"),
        }
    }

    fn config(&self) -> QueryConfig {
        self.first.config()
    }
}

/// Distinct elements of `first` that also appear in `second`.
#[derive(Clone)]
pub struct Intersect<A, B, C> {
    first: A,
    second: B,
    comparer: C,
}

impl<A, B, C> Intersect<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

pub struct IntersectCursor<'a, A: Sequence + 'a, B: Sequence + 'a, C> {
    state: Seeded<'a, A, B, C>,
}

impl<'a, A, B, C> Iterator for IntersectCursor<'a, A, B, C>
where
    A: Sequence + 'a,
    B: Sequence<Item = A::Item> + 'a,
    C: EqualityComparer<A::Item>,
{
    type Item = SeqResult<A::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        // Removing on match makes later duplicates in `first` miss.
        self.state.next_matching(|set, _, item| Ok(set.remove(item)))
    }
}

impl<A, B, C> Sequence for Intersect<A, B, C>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor<'a> = IntersectCursor<'a, A, B, C> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        IntersectCursor {
            state: Seeded::new(&self.first, &self.second, &self.comparer, "intersect"),
        }
    }

    fn config(&self) -> QueryConfig {
        self.first.config()
    }
}
