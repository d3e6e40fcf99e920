//! Projection operators: `select`, `select_many` and their indexed forms.

use crate::cursor::IndexCounter;
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Select<S, F> {
    source: S,
    f: F,
}

impl<S, F> Select<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

pub struct SelectCursor<'a, S: Sequence + 'a, F> {
    inner: S::Cursor<'a>,
    f: &'a F,
}

impl<'a, S, F, U> Iterator for SelectCursor<'a, S, F>
where
    S: Sequence + 'a,
    F: Fn(S::Item) -> U,
{
    type Item = SeqResult<U>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(self.f))
    }
}

impl<S, F, U> Sequence for Select<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;
    type Cursor<'a> = SelectCursor<'a, S, F> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectCursor {
            inner: self.source.cursor(),
            f: &self.f,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// `select` whose projection also receives the element's 0-based index.
#[derive(Clone)]
pub struct SelectIndexed<S, F> {
    source: S,
    f: F,
}

impl<S, F> SelectIndexed<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

pub struct SelectIndexedCursor<'a, S: Sequence + 'a, F> {
    inner: S::Cursor<'a>,
    f: &'a F,
    index: IndexCounter,
    done: bool,
}

impl<'a, S, F, U> Iterator for SelectIndexedCursor<'a, S, F>
where
    S: Sequence + 'a,
    F: Fn(S::Item, usize) -> U,
{
    type Item = SeqResult<U>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = self
            .inner
            .next()?
            .and_then(|item| Ok((self.f)(item, self.index.advance()?)));
        if step.is_err() {
            self.done = true;
        }
        Some(step)
    }
}

impl<S, F, U> Sequence for SelectIndexed<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize) -> U,
{
    type Item = U;
    type Cursor<'a> = SelectIndexedCursor<'a, S, F> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectIndexedCursor {
            inner: self.source.cursor(),
            f: &self.f,
            index: IndexCounter::new("select_indexed"),
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// Projects each element to an iterable and flattens the results.
#[derive(Clone)]
pub struct SelectMany<S, F> {
    source: S,
    f: F,
}

impl<S, F> SelectMany<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

pub struct SelectManyCursor<'a, S: Sequence + 'a, F, I: IntoIterator> {
    inner: S::Cursor<'a>,
    f: &'a F,
    current: Option<I::IntoIter>,
}

impl<'a, S, F, I> Iterator for SelectManyCursor<'a, S, F, I>
where
    S: Sequence + 'a,
    F: Fn(S::Item) -> I,
    I: IntoIterator,
{
    type Item = SeqResult<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(v) = current.next() {
                    return Some(Ok(v));
                }
                self.current = None;
            }
            match self.inner.next()? {
                Ok(item) => self.current = Some((self.f)(item).into_iter()),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<S, F, I> Sequence for SelectMany<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor<'a> = SelectManyCursor<'a, S, F, I> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectManyCursor {
            inner: self.source.cursor(),
            f: &self.f,
            current: None,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// `select_many` whose projection also receives the source element's index.
#[derive(Clone)]
pub struct SelectManyIndexed<S, F> {
    source: S,
    f: F,
}

impl<S, F> SelectManyIndexed<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

pub struct SelectManyIndexedCursor<'a, S: Sequence + 'a, F, I: IntoIterator> {
    inner: S::Cursor<'a>,
    f: &'a F,
    current: Option<I::IntoIter>,
    index: IndexCounter,
    done: bool,
}

impl<'a, S, F, I> Iterator for SelectManyIndexedCursor<'a, S, F, I>
where
    S: Sequence + 'a,
    F: Fn(S::Item, usize) -> I,
    I: IntoIterator,
{
    type Item = SeqResult<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(v) = current.next() {
                    return Some(Ok(v));
                }
                self.current = None;
            }
            let step = self
                .inner
                .next()?
                .and_then(|item| Ok((item, self.index.advance()?)));
            match step {
                Ok((item, i)) => self.current = Some((self.f)(item, i).into_iter()),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S, F, I> Sequence for SelectManyIndexed<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize) -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor<'a> = SelectManyIndexedCursor<'a, S, F, I> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectManyIndexedCursor {
            inner: self.source.cursor(),
            f: &self.f,
            current: None,
            index: IndexCounter::new("select_many_indexed"),
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
    fn test_select_indexed_overflow_is_fatal() {
        let s = SelectIndexed::new(from_vec(vec![1, 2, 3]), |x: i32, i: usize| (x, i));
        let mut cur = s.cursor();
        cur.index = IndexCounter::starting_at("select_indexed", usize::MAX);
        assert_eq!(cur.next(), Some(Ok((1, usize::MAX))));
        assert_eq!(
            cur.next(),
            Some(Err(SeqError::Overflow {
                operator: "select_indexed"
            }))
        );
        assert_eq!(cur.next(), None);
    }

    #[test]
    fn test_select_many_skips_empty_inner() {
        let s = SelectMany::new(from_vec(vec![0usize, 2, 0, 1]), |n| vec![n; n]);
        let out: Vec<_> = s.cursor().map(|r| r.unwrap()).collect();
        assert_eq!(out, vec![2, 2, 1]);
    }
}
