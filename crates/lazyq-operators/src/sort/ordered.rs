//! `Ordered`: a source plus its sort layers.
//!
//! Every traversal snapshots the upstream, projects keys once per element per
//! layer, and sorts an index permutation. `then_by*` only exists here, so a
//! secondary key can never be attached to an unsorted sequence.

use lazyq_core::comparer::{KeyComparer, NaturalOrder};

use super::layer::{permutation, Layer, SortLayers};
use crate::cursor::buffer_all;
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Ordered<S, L> {
    source: S,
    layers: L,
}

impl<S, L> Ordered<S, L> {
    pub fn new(source: S, layers: L) -> Self {
        Self { source, layers }
    }
}

impl<S: Sequence, L: SortLayers<S::Item>> Ordered<S, L> {
    pub fn then_by<K, F>(self, key: F) -> Ordered<S, (L, Layer<K, F, NaturalOrder>)>
    where
        F: Fn(&S::Item) -> K,
        K: Ord,
    {
        self.then_by_with(key, NaturalOrder)
    }

    pub fn then_by_descending<K, F>(self, key: F) -> Ordered<S, (L, Layer<K, F, NaturalOrder>)>
    where
        F: Fn(&S::Item) -> K,
        K: Ord,
    {
        self.then_by_descending_with(key, NaturalOrder)
    }

    pub fn then_by_with<K, F, C>(self, key: F, comparer: C) -> Ordered<S, (L, Layer<K, F, C>)>
    where
        F: Fn(&S::Item) -> K,
        C: KeyComparer<K>,
    {
        Ordered::new(self.source, (self.layers, Layer::ascending(key, comparer)))
    }

    pub fn then_by_descending_with<K, F, C>(
        self,
        key: F,
        comparer: C,
    ) -> Ordered<S, (L, Layer<K, F, C>)>
    where
        F: Fn(&S::Item) -> K,
        C: KeyComparer<K>,
    {
        Ordered::new(self.source, (self.layers, Layer::descending(key, comparer)))
    }
}

enum SortState<'a, S: Sequence + 'a> {
    Pending(S::Cursor<'a>),
    Draining(std::vec::IntoIter<S::Item>),
    Done,
}

pub struct OrderedCursor<'a, S: Sequence + 'a, L> {
    state: SortState<'a, S>,
    layers: &'a L,
    config: QueryConfig,
}

impl<'a, S, L> OrderedCursor<'a, S, L>
where
    S: Sequence + 'a,
    L: SortLayers<S::Item>,
{
    fn sorted(&self, upstream: S::Cursor<'a>) -> SeqResult<Vec<S::Item>> {
        let snapshot = buffer_all(upstream, &self.config, self.config.budget("order_by"))?;
        let order = permutation(self.layers, &snapshot);
        let mut slots: Vec<Option<S::Item>> = snapshot.into_iter().map(Some).collect();
        Ok(order.into_iter().filter_map(|pos| slots[pos].take()).collect())
    }
}

impl<'a, S, L> Iterator for OrderedCursor<'a, S, L>
where
    S: Sequence + 'a,
    L: SortLayers<S::Item>,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                SortState::Pending(_) => {
                    let SortState::Pending(upstream) =
                        std::mem::replace(&mut self.state, SortState::Done)
                    else {
                        return None;
                    };
                    match self.sorted(upstream) {
                        Ok(items) => self.state = SortState::Draining(items.into_iter()),
                        Err(e) => return Some(Err(e)),
                    }
                }
                SortState::Draining(items) => return items.next().map(Ok),
                SortState::Done => return None,
            }
        }
    }
}

impl<S, L> Sequence for Ordered<S, L>
where
    S: Sequence,
    L: SortLayers<S::Item>,
{
    type Item = S::Item;
    type Cursor<'a> = OrderedCursor<'a, S, L> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        OrderedCursor {
            state: SortState::Pending(self.source.cursor()),
            layers: &self.layers,
            config: self.source.config(),
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}
