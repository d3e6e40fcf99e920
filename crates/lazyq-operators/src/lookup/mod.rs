//! Insertion-ordered multimap backing `group_by`, `join` and `group_join`.
//!
//! Groups are stored in first-seen key order; a hash index maps a key's
//! comparer hash to the positions of the groups carrying that hash. A key
//! exists iff its group has at least one element.

pub mod group;

use std::collections::HashMap;

use lazyq_core::comparer::EqualityComparer;
use lazyq_core::config::{BufferBudget, QueryConfig};

use crate::metrics;
use crate::traits::SeqResult;

pub use group::GroupBy;

/// One key and its elements in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<K, V> {
    pub key: K,
    pub elements: Vec<V>,
}

impl<K, V> Grouping<K, V> {
    pub fn new(key: K, elements: Vec<V>) -> Self {
        Self { key, elements }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn elements(&self) -> &[V] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

pub struct Lookup<K, V, C> {
    groups: Vec<Grouping<K, V>>,
    index: HashMap<u64, Vec<usize>>,
    comparer: C,
}

impl<K, V, C: EqualityComparer<K>> Lookup<K, V, C> {
    pub fn new(comparer: C) -> Self {
        Self::with_capacity(0, comparer)
    }

    pub fn with_capacity(capacity: usize, comparer: C) -> Self {
        Self {
            groups: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            comparer,
        }
    }

    /// Drain `items` once, filing each element under its key.
    pub fn build<I, T, KF, EF>(
        items: I,
        key: KF,
        element: EF,
        comparer: C,
        config: &QueryConfig,
        budget: BufferBudget,
    ) -> SeqResult<Self>
    where
        I: Iterator<Item = SeqResult<T>>,
        KF: Fn(&T) -> K,
        EF: Fn(T) -> V,
    {
        Self::build_filtered(
            items,
            |item| Some((key(&item), element(item))),
            comparer,
            config,
            budget,
        )
    }

    /// Like `build`, but `split` may drop an element by returning `None`.
    /// Joins use this to leave absent keys out of the inner side.
    pub fn build_filtered<I, T, F>(
        items: I,
        mut split: F,
        comparer: C,
        config: &QueryConfig,
        budget: BufferBudget,
    ) -> SeqResult<Self>
    where
        I: Iterator<Item = SeqResult<T>>,
        F: FnMut(T) -> Option<(K, V)>,
    {
        let mut lookup = Self::with_capacity(config.initial_capacity(), comparer);
        let mut held = 0usize;
        for step in items {
            let filed = step.and_then(|item| {
                if let Some((k, v)) = split(item) {
                    held += 1;
                    budget.admit(held)?;
                    lookup.add(k, v);
                }
                Ok(())
            });
            if let Err(e) = filed {
                metrics::aborted(budget.operator(), held, &e);
                return Err(e);
            }
        }
        metrics::materialized(budget.operator(), held);
        Ok(lookup)
    }

    /// Append `element` to `key`'s group, creating the group on first sight.
    pub fn add(&mut self, key: K, element: V) {
        let hash = self.comparer.hash(&key);
        let slots = self.index.entry(hash).or_default();
        let found = slots
            .iter()
            .copied()
            .find(|&pos| self.comparer.equals(&self.groups[pos].key, &key));
        match found {
            Some(pos) => self.groups[pos].elements.push(element),
            None => {
                slots.push(self.groups.len());
                self.groups.push(Grouping::new(key, vec![element]));
            }
        }
    }

    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.index
            .get(&self.comparer.hash(key))?
            .iter()
            .copied()
            .find(|&pos| self.comparer.equals(&self.groups[pos].key, key))
    }

    /// Elements under `key`; empty when the key was never added.
    pub fn get(&self, key: &K) -> &[V] {
        match self.position(key) {
            Some(pos) => &self.groups[pos].elements,
            None => &[],
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    pub(crate) fn group_at(&self, pos: usize) -> &Grouping<K, V> {
        &self.groups[pos]
    }
}

impl<K, V, C> Lookup<K, V, C> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grouping<K, V>> {
        self.groups.iter()
    }

    pub fn into_groupings(self) -> Vec<Grouping<K, V>> {
        self.groups
    }
}

impl<K, V, C> IntoIterator for Lookup<K, V, C> {
    type Item = Grouping<K, V>;
    type IntoIter = std::vec::IntoIter<Grouping<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'l, K, V, C> IntoIterator for &'l Lookup<K, V, C> {
    type Item = &'l Grouping<K, V>;
    type IntoIter = std::slice::Iter<'l, Grouping<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_core::comparer::{KeyedEquality, NaturalEquality};
    use lazyq_core::error::SeqError;

    #[test]
    fn test_add_preserves_first_seen_order() {
        let mut lookup = Lookup::new(NaturalEquality);
        for v in [3, 1, 2, 1] {
            lookup.add(v % 2, v);
        }
        let groups: Vec<_> = lookup.iter().map(|g| (g.key, g.elements.clone())).collect();
        assert_eq!(groups, vec![(1, vec![3, 1, 1]), (0, vec![2])]);
    }

    #[test]
    fn test_get_missing_key_is_empty() {
        let mut lookup = Lookup::new(NaturalEquality);
        lookup.add("a", 1);
        assert_eq!(lookup.get(&"a"), &[1]);
        assert!(lookup.get(&"zzz").is_empty());
        assert!(!lookup.contains(&"zzz"));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_custom_key_equality_merges_groups() {
        let mut lookup = Lookup::new(KeyedEquality::new(|s: &String| s.to_lowercase()));
        lookup.add("Red".to_string(), 1);
        lookup.add("RED".to_string(), 2);
        lookup.add("blue".to_string(), 3);
        assert_eq!(lookup.len(), 2);
        // The first-seen spelling is kept as the group key.
        assert_eq!(lookup.iter().next().unwrap().key, "Red");
        assert_eq!(lookup.get(&"red".to_string()), &[1, 2]);
    }

    #[test]
    fn test_build_filtered_and_budget() {
        let cfg = QueryConfig::default();
        let lookup = Lookup::build_filtered(
            vec![Ok(Some(1)), Ok(None), Ok(Some(1))].into_iter(),
            |k: Option<i32>| k.map(|k| (k, k * 10)),
            NaturalEquality,
            &cfg,
            cfg.budget("join"),
        )
        .unwrap();
        assert_eq!(lookup.get(&1), &[10, 10]);

        let tight = QueryConfig::default().with_buffer_limit(1);
        let over = Lookup::build(
            vec![Ok(1), Ok(1)].into_iter(),
            |x: &i32| *x,
            |x: i32| x,
            NaturalEquality,
            &tight,
            tight.budget("group_by"),
        );
        assert!(matches!(over, Err(SeqError::BufferLimit { .. })));
    }

    #[test]
    fn test_build_stops_at_upstream_error() {
        let cfg = QueryConfig::default();
        let res = Lookup::<i32, i32, _>::build(
            vec![Ok(1), Err(SeqError::Source("bad row".into()))].into_iter(),
            |x: &i32| *x,
            |x: i32| x,
            NaturalEquality,
            &cfg,
            cfg.budget("group_by"),
        );
        assert_eq!(res.err(), Some(SeqError::Source("bad row".into())));
    }
}
