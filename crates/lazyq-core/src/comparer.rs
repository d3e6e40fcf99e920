//! Pluggable equality and ordering strategies.
//!
//! Operators take a comparer value at construction time and keep it for the
//! life of the pipeline. The non-`_with` operator variants pick
//! `NaturalEquality` / `NaturalOrder`.

use std::cmp::Ordering;
use std::hash::Hash;

use crate::hash::stable_hash;

/// Equality plus a compatible hash.
///
/// Implementations must uphold `equals(a, b) => hash(a) == hash(b)`.
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash(&self, value: &T) -> u64;
}

/// Three-way ordering over keys.
pub trait KeyComparer<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The type's own `Eq + Hash`, hashed with `StableHasher`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalEquality;

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for NaturalEquality {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash(&self, value: &T) -> u64 {
        stable_hash(value)
    }
}

/// Compares elements by a projected key using the key's natural equality.
///
/// `KeyedEquality::new(|s: &String| s.to_lowercase())` gives
/// case-insensitive string matching.
#[derive(Clone, Copy)]
pub struct KeyedEquality<F> {
    key: F,
}

impl<F> KeyedEquality<F> {
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T: ?Sized, K, F> EqualityComparer<T> for KeyedEquality<F>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash(&self, value: &T) -> u64 {
        stable_hash(&(self.key)(value))
    }
}

/// Equality from a pair of closures. The caller is responsible for the
/// hash/equality invariant.
#[derive(Clone, Copy)]
pub struct FnEquality<E, H> {
    eq: E,
    hash: H,
}

impl<E, H> FnEquality<E, H> {
    pub fn new(eq: E, hash: H) -> Self {
        Self { eq, hash }
    }
}

impl<T: ?Sized, E, H> EqualityComparer<T> for FnEquality<E, H>
where
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

impl<T: ?Sized, C: EqualityComparer<T> + ?Sized> EqualityComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (**self).hash(value)
    }
}

/// The key type's `Ord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> KeyComparer<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Ordering from a closure, e.g. `FnOrder::new(|a: &f64, b: &f64| a.total_cmp(b))`.
#[derive(Clone, Copy)]
pub struct FnOrder<F> {
    cmp: F,
}

impl<F> FnOrder<F> {
    pub fn new(cmp: F) -> Self {
        Self { cmp }
    }
}

impl<K: ?Sized, F> KeyComparer<K> for FnOrder<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.cmp)(a, b)
    }
}

impl<K: ?Sized, C: KeyComparer<K> + ?Sized> KeyComparer<K> for &C {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (**self).compare(a, b)
    }
}
