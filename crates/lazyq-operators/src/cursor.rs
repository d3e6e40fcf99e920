//! Small pieces of cursor state shared by several operators.

use lazyq_core::config::{BufferBudget, QueryConfig};

use crate::metrics;
use crate::traits::{SeqError, SeqResult};

/// Running 0-based element index for the `_indexed` operators.
///
/// The index of the element after `usize::MAX` is unrepresentable; asking
/// for it is an overflow, never a wrap.
#[derive(Debug, Clone)]
pub struct IndexCounter {
    next: Option<usize>,
    operator: &'static str,
}

impl IndexCounter {
    pub(crate) fn new(operator: &'static str) -> Self {
        Self {
            next: Some(0),
            operator,
        }
    }

    #[cfg(test)]
    pub(crate) fn starting_at(operator: &'static str, next: usize) -> Self {
        Self {
            next: Some(next),
            operator,
        }
    }

    /// Index for the element just pulled.
    pub(crate) fn advance(&mut self) -> SeqResult<usize> {
        let current = self.next.ok_or(SeqError::Overflow {
            operator: self.operator,
        })?;
        self.next = current.checked_add(1);
        Ok(current)
    }
}

/// Wraps any fallible iterator so it ends right after its first error.
pub struct Terminating<I> {
    inner: Option<I>,
}

impl<I> Terminating<I> {
    pub fn new(inner: I) -> Self {
        Self { inner: Some(inner) }
    }
}

impl<I, T> Iterator for Terminating<I>
where
    I: Iterator<Item = SeqResult<T>>,
{
    type Item = SeqResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.as_mut()?.next();
        match item {
            Some(Ok(v)) => Some(Ok(v)),
            Some(Err(e)) => {
                self.inner = None;
                Some(Err(e))
            }
            None => {
                self.inner = None;
                None
            }
        }
    }
}

/// Drain a cursor into a `Vec`, enforcing the stage's buffer budget.
pub(crate) fn buffer_all<I, T>(
    cursor: I,
    config: &QueryConfig,
    budget: BufferBudget,
) -> SeqResult<Vec<T>>
where
    I: Iterator<Item = SeqResult<T>>,
{
    let mut items = Vec::with_capacity(config.initial_capacity());
    for step in cursor {
        let pushed = step.and_then(|item| {
            budget.admit(items.len() + 1)?;
            items.push(item);
            Ok(())
        });
        if let Err(e) = pushed {
            metrics::aborted(budget.operator(), items.len(), &e);
            return Err(e);
        }
    }
    metrics::materialized(budget.operator(), items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_counts_from_zero() {
        let mut c = IndexCounter::new("select_indexed");
        assert_eq!(c.advance(), Ok(0));
        assert_eq!(c.advance(), Ok(1));
    }

    #[test]
    fn test_counter_overflows_after_max() {
        let mut c = IndexCounter::starting_at("filter_indexed", usize::MAX);
        assert_eq!(c.advance(), Ok(usize::MAX));
        assert_eq!(
            c.advance(),
            Err(SeqError::Overflow {
                operator: "filter_indexed"
            })
        );
    }

    #[test]
    fn test_buffer_all_respects_budget() {
        let cfg = QueryConfig::default().with_buffer_limit(2);
        let ok = buffer_all(vec![Ok(1), Ok(2)].into_iter(), &cfg, cfg.budget("reverse"));
        assert_eq!(ok, Ok(vec![1, 2]));
        let over = buffer_all(vec![Ok(1), Ok(2), Ok(3)].into_iter(), &cfg, cfg.budget("reverse"));
        assert_eq!(
            over,
            Err(SeqError::BufferLimit {
                operator: "reverse",
                limit: 2
            })
        );
    }

    #[test]
    fn test_terminating_stops_after_error() {
        let items = vec![Ok(1), Err(SeqError::Source("boom".into())), Ok(3)];
        let out: Vec<_> = Terminating::new(items.into_iter()).collect();
        assert_eq!(out, vec![Ok(1), Err(SeqError::Source("boom".into()))]);
    }
}
