//! Operators over two inputs or a single extra element: `concat`, `zip`,
//! `append`, `prepend`, `default_if_empty`.

use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Concat<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

enum ConcatState<'a, A: Sequence + 'a, B: Sequence + 'a> {
    First(A::Cursor<'a>),
    Second(B::Cursor<'a>),
    Done,
}

pub struct ConcatCursor<'a, A: Sequence + 'a, B: Sequence + 'a> {
    state: ConcatState<'a, A, B>,
    second: &'a B,
}

impl<'a, A, B> Iterator for ConcatCursor<'a, A, B>
where
    A: Sequence + 'a,
    B: Sequence<Item = A::Item> + 'a,
{
    type Item = SeqResult<A::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match &mut self.state {
                ConcatState::First(cur) => match cur.next() {
                    // The first side is dropped here when exhausted.
                    None => {
                        self.state = ConcatState::Second(self.second.cursor());
                        continue;
                    }
                    step => step,
                },
                ConcatState::Second(cur) => cur.next(),
                ConcatState::Done => return None,
            };
            match step {
                Some(Ok(item)) => return Some(Ok(item)),
                Some(Err(e)) => {
                    self.state = ConcatState::Done;
                    return Some(Err(e));
                }
                None => {
                    self.state = ConcatState::Done;
                    return None;
                }
            }
        }
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Cursor<'a> = ConcatCursor<'a, A, B> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ConcatCursor {
            state: ConcatState::First(self.first.cursor()),
            second: &self.second,
        }
    }

    fn config(&self) -> QueryConfig {
        self.first.config()
    }
}

/// Pairs elements positionally until the shorter side ends.
#[derive(Clone)]
pub struct Zip<A, B, F> {
    first: A,
    second: B,
    f: F,
}

impl<A, B, F> Zip<A, B, F> {
    pub fn new(first: A, second: B, f: F) -> Self {
        Self { first, second, f }
    }
}

pub struct ZipCursor<'a, A: Sequence + 'a, B: Sequence + 'a, F> {
    first: A::Cursor<'a>,
    second: B::Cursor<'a>,
    f: &'a F,
    done: bool,
}

impl<'a, A, B, F, R> Iterator for ZipCursor<'a, A, B, F>
where
    A: Sequence + 'a,
    B: Sequence + 'a,
    F: Fn(A::Item, B::Item) -> R,
{
    type Item = SeqResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let a = match self.first.next() {
            Some(Ok(a)) => a,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e));
            }
            None => {
                self.done = true;
                return None;
            }
        };
        match self.second.next() {
            Some(Ok(b)) => Some(Ok((self.f)(a, b))),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<A, B, F, R> Sequence for Zip<A, B, F>
where
    A: Sequence,
    B: Sequence,
    F: Fn(A::Item, B::Item) -> R,
{
    type Item = R;
    type Cursor<'a> = ZipCursor<'a, A, B, F> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ZipCursor {
            first: self.first.cursor(),
            second: self.second.cursor(),
            f: &self.f,
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.first.config()
    }
}

/// Upstream followed by one extra element.
#[derive(Clone)]
pub struct Append<S, T> {
    source: S,
    item: T,
}

impl<S, T> Append<S, T> {
    pub fn new(source: S, item: T) -> Self {
        Self { source, item }
    }
}

pub struct AppendCursor<'a, S: Sequence + 'a> {
    inner: Option<S::Cursor<'a>>,
    item: Option<&'a S::Item>,
}

impl<'a, S> Iterator for AppendCursor<'a, S>
where
    S: Sequence + 'a,
    S::Item: Clone,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(inner) = self.inner.as_mut() {
            match inner.next() {
                Some(Ok(v)) => return Some(Ok(v)),
                Some(Err(e)) => {
                    self.inner = None;
                    self.item = None;
                    return Some(Err(e));
                }
                None => self.inner = None,
            }
        }
        self.item.take().map(|v| Ok(v.clone()))
    }
}

impl<S, T> Sequence for Append<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;
    type Cursor<'a> = AppendCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        AppendCursor {
            inner: Some(self.source.cursor()),
            item: Some(&self.item),
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// One extra element followed by upstream. Upstream opens after the extra
/// element is pulled.
#[derive(Clone)]
pub struct Prepend<S, T> {
    source: S,
    item: T,
}

impl<S, T> Prepend<S, T> {
    pub fn new(source: S, item: T) -> Self {
        Self { source, item }
    }
}

pub struct PrependCursor<'a, S: Sequence + 'a> {
    source: &'a S,
    item: Option<&'a S::Item>,
    inner: Option<S::Cursor<'a>>,
}

impl<'a, S> Iterator for PrependCursor<'a, S>
where
    S: Sequence + 'a,
    S::Item: Clone,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.item.take() {
            self.inner = Some(self.source.cursor());
            return Some(Ok(item.clone()));
        }
        self.inner.as_mut()?.next()
    }
}

impl<S, T> Sequence for Prepend<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;
    type Cursor<'a> = PrependCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        PrependCursor {
            source: &self.source,
            item: Some(&self.item),
            inner: None,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

/// Upstream unchanged, or exactly `default` when upstream is empty.
#[derive(Clone)]
pub struct DefaultIfEmpty<S, T> {
    source: S,
    default: T,
}

impl<S, T> DefaultIfEmpty<S, T> {
    pub fn new(source: S, default: T) -> Self {
        Self { source, default }
    }
}

pub struct DefaultIfEmptyCursor<'a, S: Sequence + 'a> {
    inner: S::Cursor<'a>,
    default: Option<&'a S::Item>,
}

impl<'a, S> Iterator for DefaultIfEmptyCursor<'a, S>
where
    S: Sequence + 'a,
    S::Item: Clone,
{
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(step) => {
                self.default = None;
                Some(step)
            }
            None => self.default.take().map(|v| Ok(v.clone())),
        }
    }
}

impl<S, T> Sequence for DefaultIfEmpty<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;
    type Cursor<'a> = DefaultIfEmptyCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        DefaultIfEmptyCursor {
            inner: self.source.cursor(),
            default: Some(&self.default),
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}
