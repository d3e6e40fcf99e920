//! Sort key layers.
//!
//! A layer chain is a nested tuple, most significant layer innermost:
//! `((primary, secondary), tertiary)`. Each layer projects its keys once per
//! snapshot element, then compares by snapshot position.

use std::cmp::Ordering;
use std::marker::PhantomData;

use lazyq_core::comparer::KeyComparer;

pub trait SortLayers<T> {
    /// Keys projected from one snapshot, indexed like the snapshot.
    type Keys;

    fn extract(&self, items: &[T]) -> Self::Keys;

    fn compare(&self, keys: &Self::Keys, a: usize, b: usize) -> Ordering;
}

/// One `(key selector, comparer, direction)` layer.
pub struct Layer<K, F, C> {
    key: F,
    comparer: C,
    descending: bool,
    _key: PhantomData<fn() -> K>,
}

impl<K, F, C> Layer<K, F, C> {
    pub fn ascending(key: F, comparer: C) -> Self {
        Self::new(key, comparer, false)
    }

    pub fn descending(key: F, comparer: C) -> Self {
        Self::new(key, comparer, true)
    }

    fn new(key: F, comparer: C, descending: bool) -> Self {
        Self {
            key,
            comparer,
            descending,
            _key: PhantomData,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

impl<K, F: Clone, C: Clone> Clone for Layer<K, F, C> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone(), self.comparer.clone(), self.descending)
    }
}

impl<T, K, F, C> SortLayers<T> for Layer<K, F, C>
where
    F: Fn(&T) -> K,
    C: KeyComparer<K>,
{
    type Keys = Vec<K>;

    fn extract(&self, items: &[T]) -> Vec<K> {
        items.iter().map(|item| (self.key)(item)).collect()
    }

    fn compare(&self, keys: &Vec<K>, a: usize, b: usize) -> Ordering {
        let ord = self.comparer.compare(&keys[a], &keys[b]);
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl<T, A, B> SortLayers<T> for (A, B)
where
    A: SortLayers<T>,
    B: SortLayers<T>,
{
    type Keys = (A::Keys, B::Keys);

    fn extract(&self, items: &[T]) -> Self::Keys {
        (self.0.extract(items), self.1.extract(items))
    }

    fn compare(&self, keys: &Self::Keys, a: usize, b: usize) -> Ordering {
        self.0
            .compare(&keys.0, a, b)
            .then_with(|| self.1.compare(&keys.1, a, b))
    }
}

/// Snapshot positions in sorted order. Full ties keep ascending position.
pub fn permutation<T, L: SortLayers<T>>(layers: &L, items: &[T]) -> Vec<usize> {
    let keys = layers.extract(items);
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| layers.compare(&keys, a, b).then(a.cmp(&b)));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_core::comparer::{FnOrder, NaturalOrder};

    #[test]
    fn test_single_layer_is_stable() {
        let items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        let by_num = Layer::ascending(|p: &(i32, char)| p.0, NaturalOrder);
        assert_eq!(permutation(&by_num, &items), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_descending_keeps_ties_in_source_order() {
        let items = vec![1, 3, 1, 3];
        let desc = Layer::descending(|x: &i32| *x, NaturalOrder);
        assert_eq!(permutation(&desc, &items), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_chained_layers_with_mixed_direction() {
        let items = vec![("b", 1), ("a", 2), ("b", 3), ("a", 1)];
        let layers = (
            Layer::ascending(|p: &(&str, i32)| p.0.to_string(), NaturalOrder),
            Layer::descending(|p: &(&str, i32)| p.1, NaturalOrder),
        );
        assert_eq!(permutation(&layers, &items), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_float_keys_with_total_order() {
        let items = vec![2.5, -0.0, f64::NAN, 0.0, -1.0];
        let layer = Layer::ascending(|x: &f64| *x, FnOrder::new(|a: &f64, b: &f64| a.total_cmp(b)));
        assert_eq!(permutation(&layer, &items), vec![4, 1, 3, 0, 2]);
    }
}
