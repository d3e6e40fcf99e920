//! `cast` and `of_type`: runtime type-tag checks over heterogeneous input.
//!
//! Both go through `Downcast<T>`. `cast` fails the traversal at the first
//! element that does not convert; `of_type` drops it.

use std::marker::PhantomData;

use lazyq_core::value::Downcast;

use crate::traits::{QueryConfig, SeqError, SeqResult, Sequence};

pub struct Cast<S, T> {
    source: S,
    _target: PhantomData<fn() -> T>,
}

impl<S, T> Cast<S, T> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _target: PhantomData,
        }
    }
}

impl<S: Clone, T> Clone for Cast<S, T> {
    fn clone(&self) -> Self {
        Self::new(self.source.clone())
    }
}

pub struct CastCursor<'a, S: Sequence + 'a, T> {
    inner: S::Cursor<'a>,
    done: bool,
    _target: PhantomData<fn() -> T>,
}

impl<'a, S, T> Iterator for CastCursor<'a, S, T>
where
    S: Sequence + 'a,
    S::Item: Downcast<T>,
{
    type Item = SeqResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = self.inner.next()?.and_then(|item| {
            Downcast::<T>::downcast(item).map_err(|rejected| SeqError::InvalidCast {
                expected: std::any::type_name::<T>(),
                found: Downcast::<T>::describe(&rejected),
            })
        });
        if step.is_err() {
            self.done = true;
        }
        Some(step)
    }
}

impl<S, T> Sequence for Cast<S, T>
where
    S: Sequence,
    S::Item: Downcast<T>,
{
    type Item = T;
    type Cursor<'a> = CastCursor<'a, S, T> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        CastCursor {
            inner: self.source.cursor(),
            done: false,
            _target: PhantomData,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}

pub struct OfType<S, T> {
    source: S,
    _target: PhantomData<fn() -> T>,
}

impl<S, T> OfType<S, T> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _target: PhantomData,
        }
    }
}

impl<S: Clone, T> Clone for OfType<S, T> {
    fn clone(&self) -> Self {
        Self::new(self.source.clone())
    }
}

pub struct OfTypeCursor<'a, S: Sequence + 'a, T> {
    inner: S::Cursor<'a>,
    _target: PhantomData<fn() -> T>,
}

impl<'a, S, T> Iterator for OfTypeCursor<'a, S, T>
where
    S: Sequence + 'a,
    S::Item: Downcast<T>,
{
    type Item = SeqResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(item) => match Downcast::<T>::downcast(item) {
                    Ok(v) => return Some(Ok(v)),
                    Err(_) => continue,
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<S, T> Sequence for OfType<S, T>
where
    S: Sequence,
    S::Item: Downcast<T>,
{
    type Item = T;
    type Cursor<'a> = OfTypeCursor<'a, S, T> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        OfTypeCursor {
            inner: self.source.cursor(),
            _target: PhantomData,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}
