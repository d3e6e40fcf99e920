//! Pipeline configuration that downstream crates can serialize/deserialize.
//!
//! A `QueryConfig` is attached to a source and read by every stage built on
//! top of it, so one pipeline shares one set of limits.

use serde::{Deserialize, Serialize};

use crate::error::{SeqError, SeqResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Hard cap on the number of elements one buffering stage (sort, group,
    /// set seed, reverse) may hold. `None` means unbounded.
    pub buffer_limit: Option<usize>,

    /// Initial capacity for uniqueness sets, lookups and sort snapshots.
    pub capacity_hint: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            buffer_limit: None,
            capacity_hint: 16,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYQ_BUFFER_LIMIT`: per-stage element cap
    /// - `LAZYQ_CAPACITY_HINT`: initial structure capacity
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    /// Unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("LAZYQ_BUFFER_LIMIT") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.buffer_limit = Some(v);
            }
        }

        if let Some(s) = lookup("LAZYQ_CAPACITY_HINT") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.capacity_hint = v;
            }
        }

        cfg
    }

    pub fn with_buffer_limit(mut self, limit: usize) -> Self {
        self.buffer_limit = Some(limit);
        self
    }

    pub fn with_capacity_hint(mut self, hint: usize) -> Self {
        self.capacity_hint = hint;
        self
    }

    /// Budget handed to one buffering stage of one traversal.
    pub fn budget(&self, operator: &'static str) -> BufferBudget {
        BufferBudget {
            operator,
            limit: self.buffer_limit,
        }
    }

    /// Capacity to preallocate, never above the buffer limit.
    pub fn initial_capacity(&self) -> usize {
        match self.buffer_limit {
            Some(limit) => self.capacity_hint.min(limit),
            None => self.capacity_hint,
        }
    }
}

/// Element cap for a single buffering stage.
#[derive(Debug, Clone, Copy)]
pub struct BufferBudget {
    operator: &'static str,
    limit: Option<usize>,
}

impl BufferBudget {
    pub fn unlimited(operator: &'static str) -> Self {
        Self {
            operator,
            limit: None,
        }
    }

    pub fn operator(&self) -> &'static str {
        self.operator
    }

    /// Check that holding `len` elements stays within the cap.
    pub fn admit(&self, len: usize) -> SeqResult<()> {
        match self.limit {
            Some(limit) if len > limit => Err(SeqError::BufferLimit {
                operator: self.operator,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_known_vars() {
        let vars: HashMap<&str, &str> = [
            ("LAZYQ_BUFFER_LIMIT", "1000"),
            ("LAZYQ_CAPACITY_HINT", " 64 "),
        ]
        .into_iter()
        .collect();
        let cfg = QueryConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.buffer_limit, Some(1000));
        assert_eq!(cfg.capacity_hint, 64);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let cfg = QueryConfig::from_lookup(|_| Some("lots".to_string()));
        assert_eq!(cfg, QueryConfig::default());
    }

    #[test]
    fn test_budget_admit() {
        let budget = QueryConfig::default().with_buffer_limit(2).budget("order_by");
        assert!(budget.admit(2).is_ok());
        assert_eq!(
            budget.admit(3),
            Err(SeqError::BufferLimit {
                operator: "order_by",
                limit: 2
            })
        );
        assert!(BufferBudget::unlimited("x").admit(usize::MAX).is_ok());
    }

    #[test]
    fn test_initial_capacity_respects_limit() {
        let cfg = QueryConfig::default().with_capacity_hint(128).with_buffer_limit(8);
        assert_eq!(cfg.initial_capacity(), 8);
    }

    #[test]
    fn test_serde_roundtrip() {
        let cfg = QueryConfig::default().with_buffer_limit(10);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: QueryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
