//! Stable hashing for comparer defaults.
//!
//! Output depends only on the hashed bytes, not on the process or toolchain.

use std::hash::{Hash, Hasher};

/// `std::hash::Hasher` backed by blake3. `finish` folds the first eight bytes
/// of the digest into a `u64`.
#[derive(Clone, Default)]
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hasher for StableHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.inner.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}

/// Hash any `Hash` value through `StableHasher`.
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut h = StableHasher::new();
    value.hash(&mut h);
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_hash_equal() {
        assert_eq!(stable_hash("apple"), stable_hash(&"apple".to_string()));
        assert_eq!(stable_hash(&(1u32, 'x')), stable_hash(&(1u32, 'x')));
    }

    #[test]
    fn test_different_values_usually_differ() {
        assert_ne!(stable_hash(&1u64), stable_hash(&2u64));
    }

    #[test]
    fn test_finish_is_repeatable() {
        let mut h = StableHasher::new();
        42i32.hash(&mut h);
        assert_eq!(h.finish(), h.finish());
    }
}
