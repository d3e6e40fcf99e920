//! Method-chaining surface for every `Sequence`.
//!
//! Operator methods take `self` and return a new lazy sequence; nothing runs
//! until a cursor is pulled. Eagerly checkable arguments (`chunk`) return
//! `SeqResult`. Reductions and `to_lookup` take `&self` and run immediately.
//! The non-`_with` variants pick the natural comparer.

use std::hash::Hash;

use lazyq_core::comparer::{EqualityComparer, KeyComparer, NaturalEquality, NaturalOrder};
use lazyq_core::value::Downcast;

use crate::join::{GroupJoin, Join};
use crate::lookup::{GroupBy, Grouping, Lookup};
use crate::reduce;
use crate::set::{Distinct, DistinctBy, Except, Intersect, Union};
use crate::sort::{Layer, Ordered};
use crate::stream::{
    Append, Cast, Chunk, Concat, DefaultIfEmpty, Filter, FilterIndexed, Indexed, OfType, Plain,
    Prepend, Reverse, Select, SelectIndexed, SelectMany, SelectManyIndexed, Skip, SkipWhile, Take,
    TakeWhile, Zip,
};
use crate::traits::{SeqResult, Sequence};

/// Element selector used when groups hold the elements themselves.
pub type Identity<T> = fn(T) -> T;

/// Result selector used when `group_by` yields plain groupings.
pub type IntoGrouping<K, V> = fn(K, Vec<V>) -> Grouping<K, V>;

/// Output of `group_by`.
pub type GroupByKey<S, KF, K, T, C = NaturalEquality> =
    GroupBy<S, KF, Identity<T>, IntoGrouping<K, T>, C>;

/// Output of `group_by_element` and `group_by_with`.
pub type GroupByElement<S, KF, EF, K, V, C = NaturalEquality> =
    GroupBy<S, KF, EF, IntoGrouping<K, V>, C>;

fn identity<T>(item: T) -> T {
    item
}

pub trait SequenceExt: Sequence + Sized {
    fn select<U, F>(self, f: F) -> Select<Self, F>
    where
        F: Fn(Self::Item) -> U,
    {
        Select::new(self, f)
    }

    fn select_indexed<U, F>(self, f: F) -> SelectIndexed<Self, F>
    where
        F: Fn(Self::Item, usize) -> U,
    {
        SelectIndexed::new(self, f)
    }

    /// Keeps elements for which `predicate` holds.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    fn filter_indexed<P>(self, predicate: P) -> FilterIndexed<Self, P>
    where
        P: Fn(&Self::Item, usize) -> bool,
    {
        FilterIndexed::new(self, predicate)
    }

    fn select_many<I, F>(self, f: F) -> SelectMany<Self, F>
    where
        F: Fn(Self::Item) -> I,
        I: IntoIterator,
    {
        SelectMany::new(self, f)
    }

    fn select_many_indexed<I, F>(self, f: F) -> SelectManyIndexed<Self, F>
    where
        F: Fn(Self::Item, usize) -> I,
        I: IntoIterator,
    {
        SelectManyIndexed::new(self, f)
    }

    fn take(self, count: i64) -> Take<Self> {
        Take::new(self, count)
    }

    fn skip(self, count: i64) -> Skip<Self> {
        Skip::new(self, count)
    }

    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, Plain<P>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, Plain(predicate))
    }

    fn take_while_indexed<P>(self, predicate: P) -> TakeWhile<Self, Indexed<P>>
    where
        P: Fn(&Self::Item, usize) -> bool,
    {
        TakeWhile::new(self, Indexed(predicate))
    }

    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, Plain<P>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, Plain(predicate))
    }

    fn skip_while_indexed<P>(self, predicate: P) -> SkipWhile<Self, Indexed<P>>
    where
        P: Fn(&Self::Item, usize) -> bool,
    {
        SkipWhile::new(self, Indexed(predicate))
    }

    fn concat<B>(self, other: B) -> Concat<Self, B>
    where
        B: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    fn default_if_empty(self, default: Self::Item) -> DefaultIfEmpty<Self, Self::Item>
    where
        Self::Item: Clone,
    {
        DefaultIfEmpty::new(self, default)
    }

    fn cast<T>(self) -> Cast<Self, T>
    where
        Self::Item: Downcast<T>,
    {
        Cast::new(self)
    }

    fn of_type<T>(self) -> OfType<Self, T>
    where
        Self::Item: Downcast<T>,
    {
        OfType::new(self)
    }

    fn zip<B, R, F>(self, other: B, f: F) -> Zip<Self, B, F>
    where
        B: Sequence,
        F: Fn(Self::Item, B::Item) -> R,
    {
        Zip::new(self, other, f)
    }

    fn append(self, item: Self::Item) -> Append<Self, Self::Item>
    where
        Self::Item: Clone,
    {
        Append::new(self, item)
    }

    fn prepend(self, item: Self::Item) -> Prepend<Self, Self::Item>
    where
        Self::Item: Clone,
    {
        Prepend::new(self, item)
    }

    fn chunk(self, size: usize) -> SeqResult<Chunk<Self>> {
        Chunk::new(self, size)
    }

    fn reverse(self) -> Reverse<Self> {
        Reverse::new(self)
    }

    fn distinct(self) -> Distinct<Self, NaturalEquality>
    where
        Self::Item: Eq + Hash + Clone,
    {
        Distinct::new(self, NaturalEquality)
    }

    fn distinct_with<C>(self, comparer: C) -> Distinct<Self, C>
    where
        Self::Item: Clone,
        C: EqualityComparer<Self::Item>,
    {
        Distinct::new(self, comparer)
    }

    fn distinct_by<K, F>(self, key: F) -> DistinctBy<Self, F, NaturalEquality>
    where
        F: Fn(&Self::Item) -> K,
        K: Eq + Hash,
    {
        DistinctBy::new(self, key, NaturalEquality)
    }

    fn distinct_by_with<K, F, C>(self, key: F, comparer: C) -> DistinctBy<Self, F, C>
    where
        F: Fn(&Self::Item) -> K,
        C: EqualityComparer<K>,
    {
        DistinctBy::new(self, key, comparer)
    }

    fn union<B>(self, other: B) -> Union<Self, B, NaturalEquality>
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: Eq + Hash + Clone,
    {
        Union::new(self, other, NaturalEquality)
    }

    fn union_with<B, C>(self, other: B, comparer: C) -> Union<Self, B, C>
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: Clone,
        C: EqualityComparer<Self::Item>,
    {
        Union::new(self, other, comparer)
    }

    fn except<B>(self, other: B) -> Except<Self, B, NaturalEquality>
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: Eq + Hash + Clone,
    {
        Except::new(self, other, NaturalEquality)
    }

    fn except_with<B, C>(self, other: B, comparer: C) -> Except<Self, B, C>
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: Clone,
        C: EqualityComparer<Self::Item>,
    {
        Except::new(self, other, comparer)
    }

    fn intersect<B>(self, other: B) -> Intersect<Self, B, NaturalEquality>
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        Intersect::new(self, other, NaturalEquality)
    }

    fn intersect_with<B, C>(self, other: B, comparer: C) -> Intersect<Self, B, C>
    where
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Intersect::new(self, other, comparer)
    }

    /// Groups of elements sharing a key, in first-seen key order.
    fn group_by<K, KF>(self, key: KF) -> GroupByKey<Self, KF, K, Self::Item>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash,
    {
        GroupBy::new(
            self,
            key,
            identity as Identity<Self::Item>,
            Grouping::new as IntoGrouping<K, Self::Item>,
            NaturalEquality,
        )
    }

    fn group_by_element<K, V, KF, EF>(
        self,
        key: KF,
        element: EF,
    ) -> GroupByElement<Self, KF, EF, K, V>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        K: Eq + Hash,
    {
        self.group_by_with(key, element, NaturalEquality)
    }

    fn group_by_with<K, V, KF, EF, C>(
        self,
        key: KF,
        element: EF,
        comparer: C,
    ) -> GroupByElement<Self, KF, EF, K, V, C>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        C: EqualityComparer<K>,
    {
        GroupBy::new(
            self,
            key,
            element,
            Grouping::new as IntoGrouping<K, V>,
            comparer,
        )
    }

    /// Maps every `(key, elements)` group through `result`.
    fn group_by_result<K, V, R, KF, EF, RF>(
        self,
        key: KF,
        element: EF,
        result: RF,
    ) -> GroupBy<Self, KF, EF, RF, NaturalEquality>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        RF: Fn(K, Vec<V>) -> R,
        K: Eq + Hash,
    {
        GroupBy::new(self, key, element, result, NaturalEquality)
    }

    fn group_by_result_with<K, V, R, KF, EF, RF, C>(
        self,
        key: KF,
        element: EF,
        result: RF,
        comparer: C,
    ) -> GroupBy<Self, KF, EF, RF, C>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        RF: Fn(K, Vec<V>) -> R,
        C: EqualityComparer<K>,
    {
        GroupBy::new(self, key, element, result, comparer)
    }

    /// Inner equality join. A `None` key matches nothing.
    fn join<I, K, R, OKF, IKF, RF>(
        self,
        inner: I,
        outer_key: OKF,
        inner_key: IKF,
        result: RF,
    ) -> Join<Self, I, OKF, IKF, RF, NaturalEquality>
    where
        I: Sequence,
        OKF: Fn(&Self::Item) -> Option<K>,
        IKF: Fn(&I::Item) -> Option<K>,
        RF: Fn(&Self::Item, &I::Item) -> R,
        K: Eq + Hash,
    {
        Join::new(self, inner, outer_key, inner_key, result, NaturalEquality)
    }

    fn join_with<I, K, R, OKF, IKF, RF, C>(
        self,
        inner: I,
        outer_key: OKF,
        inner_key: IKF,
        result: RF,
        comparer: C,
    ) -> Join<Self, I, OKF, IKF, RF, C>
    where
        I: Sequence,
        OKF: Fn(&Self::Item) -> Option<K>,
        IKF: Fn(&I::Item) -> Option<K>,
        RF: Fn(&Self::Item, &I::Item) -> R,
        C: EqualityComparer<K>,
    {
        Join::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn group_join<I, K, R, OKF, IKF, RF>(
        self,
        inner: I,
        outer_key: OKF,
        inner_key: IKF,
        result: RF,
    ) -> GroupJoin<Self, I, OKF, IKF, RF, NaturalEquality>
    where
        I: Sequence,
        OKF: Fn(&Self::Item) -> Option<K>,
        IKF: Fn(&I::Item) -> Option<K>,
        RF: Fn(Self::Item, &[I::Item]) -> R,
        K: Eq + Hash,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, NaturalEquality)
    }

    fn group_join_with<I, K, R, OKF, IKF, RF, C>(
        self,
        inner: I,
        outer_key: OKF,
        inner_key: IKF,
        result: RF,
        comparer: C,
    ) -> GroupJoin<Self, I, OKF, IKF, RF, C>
    where
        I: Sequence,
        OKF: Fn(&Self::Item) -> Option<K>,
        IKF: Fn(&I::Item) -> Option<K>,
        RF: Fn(Self::Item, &[I::Item]) -> R,
        C: EqualityComparer<K>,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn order_by<K, F>(self, key: F) -> Ordered<Self, Layer<K, F, NaturalOrder>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        Ordered::new(self, Layer::ascending(key, NaturalOrder))
    }

    fn order_by_descending<K, F>(self, key: F) -> Ordered<Self, Layer<K, F, NaturalOrder>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        Ordered::new(self, Layer::descending(key, NaturalOrder))
    }

    fn order_by_with<K, F, C>(self, key: F, comparer: C) -> Ordered<Self, Layer<K, F, C>>
    where
        F: Fn(&Self::Item) -> K,
        C: KeyComparer<K>,
    {
        Ordered::new(self, Layer::ascending(key, comparer))
    }

    fn order_by_descending_with<K, F, C>(
        self,
        key: F,
        comparer: C,
    ) -> Ordered<Self, Layer<K, F, C>>
    where
        F: Fn(&Self::Item) -> K,
        C: KeyComparer<K>,
    {
        Ordered::new(self, Layer::descending(key, comparer))
    }

    /// Drain now into a `Lookup` keyed by `key`.
    fn to_lookup<K, V, KF, EF>(
        &self,
        key: KF,
        element: EF,
    ) -> SeqResult<Lookup<K, V, NaturalEquality>>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        K: Eq + Hash,
    {
        self.to_lookup_with(key, element, NaturalEquality)
    }

    fn to_lookup_with<K, V, KF, EF, C>(
        &self,
        key: KF,
        element: EF,
        comparer: C,
    ) -> SeqResult<Lookup<K, V, C>>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        C: EqualityComparer<K>,
    {
        let config = self.config();
        Lookup::build(
            self.cursor(),
            key,
            element,
            comparer,
            &config,
            config.budget("to_lookup"),
        )
    }

    fn to_vec(&self) -> SeqResult<Vec<Self::Item>> {
        reduce::to_vec(self)
    }

    fn count(&self) -> SeqResult<usize> {
        reduce::count(self)
    }

    fn first(&self) -> SeqResult<Self::Item> {
        reduce::first(self)
    }

    fn first_or_default(&self) -> SeqResult<Self::Item>
    where
        Self::Item: Default,
    {
        reduce::first_or_default(self)
    }

    fn last(&self) -> SeqResult<Self::Item> {
        reduce::last(self)
    }

    fn contains(&self, needle: &Self::Item) -> SeqResult<bool>
    where
        Self::Item: PartialEq,
    {
        reduce::contains(self, needle)
    }

    fn sequence_equal<B>(&self, other: &B) -> SeqResult<bool>
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: PartialEq,
    {
        reduce::sequence_equal(self, other)
    }

    fn min_f64(&self) -> SeqResult<f64>
    where
        Self: Sequence<Item = f64>,
    {
        reduce::min_f64(self)
    }

    fn max_f64(&self) -> SeqResult<f64>
    where
        Self: Sequence<Item = f64>,
    {
        reduce::max_f64(self)
    }
}

impl<S: Sequence> SequenceExt for S {}
