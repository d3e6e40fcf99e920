//! Filter operator (`Where`) and its indexed form.

use crate::cursor::IndexCounter;
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct FilterCursor<'a, S: Sequence + 'a, P> {
    inner: S::Cursor<'a>,
    predicate: &'a P,
}

impl<'a, S, P> Iterator for FilterCursor<'a, S, P>
where
    S: Sequence + 'a,
    P: Fn(&S::Item) -> bool,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(item) if (self.predicate)(&item) => return Some(Ok(item)),
                Ok(_) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor<'a> = FilterCursor<'a, S, P> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilterCursor {
            inner: self.source.cursor(),
            predicate: &self.predicate,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

#[derive(Clone)]
pub struct FilterIndexed<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> FilterIndexed<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct FilterIndexedCursor<'a, S: Sequence + 'a, P> {
    inner: S::Cursor<'a>,
    predicate: &'a P,
    index: IndexCounter,
    done: bool,
}

impl<'a, S, P> Iterator for FilterIndexedCursor<'a, S, P>
where
    S: Sequence + 'a,
    P: Fn(&S::Item, usize) -> bool,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let step = self
                .inner
                .next()?
                .and_then(|item| Ok((item, self.index.advance()?)));
            match step {
                Ok((item, i)) if (self.predicate)(&item, i) => return Some(Ok(item)),
                Ok(_) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S, P> Sequence for FilterIndexed<S, P>
where
    S: Sequence,
    P: Fn(&S::Item, usize) -> bool,
{
    type Item = S::Item;
    type Cursor<'a> = FilterIndexedCursor<'a, S, P> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilterIndexedCursor {
            inner: self.source.cursor(),
            predicate: &self.predicate,
            index: IndexCounter::new("filter_indexed"),
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
    use crate::traits::SeqError;

    #[test]
    fn test_filter_indexed_sees_every_index() {
        let f = FilterIndexed::new(from_vec(vec![10, 11, 12, 13, 14]), |x: &i32, i: usize| {
            i % 2 == 0 && *x >= 10
        });
        let out: Vec<_> = f.cursor().map(|r| r.unwrap()).collect();
        assert_eq!(out, vec![10, 12, 14]);
    }

    #[test]
    fn test_filter_indexed_overflow_is_fatal() {
        let f = FilterIndexed::new(from_vec(vec![1, 2, 3]), |_: &i32, _: usize| false);
        let mut cur = f.cursor();
        cur.index = IndexCounter::starting_at("filter_indexed", usize::MAX);
        assert_eq!(
            cur.next(),
            Some(Err(SeqError::Overflow {
                operator: "filter_indexed"
            }))
        );
        assert_eq!(cur.next(), None);
    }
}
