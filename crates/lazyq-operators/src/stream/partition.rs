//! Partitioning operators: `take`, `skip`, `take_while`, `skip_while`, `chunk`.

use crate::cursor::IndexCounter;
use crate::traits::{QueryConfig, SeqError, SeqResult, Sequence};

/// Yields at most `count` elements. `count <= 0` never opens the upstream.
#[derive(Clone)]
pub struct Take<S> {
    source: S,
    count: i64,
}

impl<S> Take<S> {
    pub fn new(source: S, count: i64) -> Self {
        Self { source, count }
    }
}

pub struct TakeCursor<'a, S: Sequence + 'a> {
    // Dropped as soon as the quota is met, releasing whatever upstream holds.
    inner: Option<S::Cursor<'a>>,
    remaining: u64,
}

impl<'a, S: Sequence + 'a> Iterator for TakeCursor<'a, S> {
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        match inner.next() {
            Some(Ok(item)) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.inner = None;
                }
                Some(Ok(item))
            }
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

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    type Cursor<'a> = TakeCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        if self.count <= 0 {
            return TakeCursor {
                inner: None,
                remaining: 0,
            };
        }
        TakeCursor {
            inner: Some(self.source.cursor()),
            remaining: self.count as u64,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// Discards the first `count` elements. `count <= 0` passes everything.
#[derive(Clone)]
pub struct Skip<S> {
    source: S,
    count: i64,
}

impl<S> Skip<S> {
    pub fn new(source: S, count: i64) -> Self {
        Self { source, count }
    }
}

pub struct SkipCursor<'a, S: Sequence + 'a> {
    inner: S::Cursor<'a>,
    to_skip: u64,
}

impl<'a, S: Sequence + 'a> Iterator for SkipCursor<'a, S> {
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.to_skip > 0 {
            match self.inner.next()? {
                Ok(_) => self.to_skip -= 1,
                Err(e) => {
                    self.to_skip = 0;
                    return Some(Err(e));
                }
            }
        }
        self.inner.next()
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Cursor<'a> = SkipCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        SkipCursor {
            inner: self.source.cursor(),
            to_skip: self.count.max(0) as u64,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// Predicate shape shared by `take_while` and `skip_while`.
pub trait WhilePredicate<T> {
    /// Whether `test` consumes the running index.
    const INDEXED: bool;

    fn test(&self, item: &T, index: &mut IndexCounter) -> SeqResult<bool>;
}

/// `Fn(&T) -> bool`.
#[derive(Clone)]
pub struct Plain<P>(pub P);

/// `Fn(&T, usize) -> bool`, fed a running index.
#[derive(Clone)]
pub struct Indexed<P>(pub P);

impl<T, P: Fn(&T) -> bool> WhilePredicate<T> for Plain<P> {
    const INDEXED: bool = false;

    fn test(&self, item: &T, _index: &mut IndexCounter) -> SeqResult<bool> {
        Ok((self.0)(item))
    }
}

impl<T, P: Fn(&T, usize) -> bool> WhilePredicate<T> for Indexed<P> {
    const INDEXED: bool = true;

    fn test(&self, item: &T, index: &mut IndexCounter) -> SeqResult<bool> {
        let i = index.advance()?;
        Ok((self.0)(item, i))
    }
}

#[derive(Clone)]
pub struct TakeWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> TakeWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct TakeWhileCursor<'a, S: Sequence + 'a, P> {
    inner: Option<S::Cursor<'a>>,
    predicate: &'a P,
    index: IndexCounter,
}

impl<'a, S, P> Iterator for TakeWhileCursor<'a, S, P>
where
    S: Sequence + 'a,
    P: WhilePredicate<S::Item>,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.inner.as_mut()?.next() {
            Some(Ok(item)) => match self.predicate.test(&item, &mut self.index) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            },
            Some(Err(e)) => Some(Err(e)),
            None => None,
        };
        self.inner = None;
        step
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: WhilePredicate<S::Item>,
{
    type Item = S::Item;
    type Cursor<'a> = TakeWhileCursor<'a, S, P> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        TakeWhileCursor {
            inner: Some(self.source.cursor()),
            predicate: &self.predicate,
            index: IndexCounter::new(if P::INDEXED {
                "take_while_indexed"
            } else {
                "take_while"
            }),
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

#[derive(Clone)]
pub struct SkipWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> SkipWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct SkipWhileCursor<'a, S: Sequence + 'a, P> {
    inner: S::Cursor<'a>,
    predicate: &'a P,
    index: IndexCounter,
    skipping: bool,
    done: bool,
}

impl<'a, S, P> Iterator for SkipWhileCursor<'a, S, P>
where
    S: Sequence + 'a,
    P: WhilePredicate<S::Item>,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.skipping {
            return self.inner.next();
        }
        loop {
            let item = match self.inner.next()? {
                Ok(item) => item,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            match self.predicate.test(&item, &mut self.index) {
                Ok(true) => continue,
                Ok(false) => {
                    self.skipping = false;
                    return Some(Ok(item));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: WhilePredicate<S::Item>,
{
    type Item = S::Item;
    type Cursor<'a> = SkipWhileCursor<'a, S, P> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        SkipWhileCursor {
            inner: self.source.cursor(),
            predicate: &self.predicate,
            index: IndexCounter::new(if P::INDEXED {
                "skip_while_indexed"
            } else {
                "skip_while"
            }),
            skipping: true,
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// Consecutive batches of `size` elements; the last batch may be shorter.
#[derive(Clone)]
pub struct Chunk<S> {
    source: S,
    size: usize,
}

impl<S> Chunk<S> {
    pub fn new(source: S, size: usize) -> SeqResult<Self> {
        if size == 0 {
            tracing::debug!("chunk rejected zero size");
            return Err(SeqError::precondition("chunk", "size must be at least 1"));
        }
        Ok(Self { source, size })
    }
}

pub struct ChunkCursor<'a, S: Sequence + 'a> {
    inner: S::Cursor<'a>,
    size: usize,
    done: bool,
}

impl<'a, S: Sequence + 'a> Iterator for ChunkCursor<'a, S> {
    type Item = SeqResult<Vec<S::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut batch = Vec::with_capacity(self.size);
        while batch.len() < self.size {
            match self.inner.next() {
                Some(Ok(item)) => batch.push(item),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }
        if batch.is_empty() {
            None
        } else {
            Some(Ok(batch))
        }
    }
}

impl<S: Sequence> Sequence for Chunk<S> {
    type Item = Vec<S::Item>;
    type Cursor<'a> = ChunkCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ChunkCursor {
            inner: self.source.cursor(),
            size: self.size,
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;

    #[test]
    fn test_take_negative_never_opens_upstream() {
        let t = Take::new(from_vec(vec![1, 2]), -5);
        let cur = t.cursor();
        assert!(cur.inner.is_none());
    }

    #[test]
    fn test_take_releases_upstream_when_done() {
        let t = Take::new(from_vec(vec![1, 2, 3]), 2);
        let mut cur = t.cursor();
        assert_eq!(cur.next(), Some(Ok(1)));
        assert!(cur.inner.is_some());
        assert_eq!(cur.next(), Some(Ok(2)));
        assert!(cur.inner.is_none());
        assert_eq!(cur.next(), None);
    }

    #[test]
    fn test_indexed_take_while_overflow() {
        let predicate = Indexed(|_: &i32, _: usize| true);
        let t = TakeWhile::new(from_vec(vec![1, 2]), predicate);
        let mut cur = t.cursor();
        cur.index = IndexCounter::starting_at("take_while_indexed", usize::MAX);
        assert_eq!(cur.next(), Some(Ok(1)));
        assert!(matches!(cur.next(), Some(Err(SeqError::Overflow { .. }))));
        assert_eq!(cur.next(), None);
    }

    #[test]
    fn test_chunk_rejects_zero() {
        assert!(Chunk::new(from_vec(vec![1]), 0).err().unwrap().is_precondition());
    }
}
