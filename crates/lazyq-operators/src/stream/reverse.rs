//! `reverse`: the one single-input operator that must see the whole
//! upstream before yielding anything.

use crate::cursor::buffer_all;
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Reverse<S> {
    source: S,
}

impl<S> Reverse<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

enum ReverseState<'a, S: Sequence + 'a> {
    Pending(S::Cursor<'a>),
    Draining(Vec<S::Item>),
    Done,
}

pub struct ReverseCursor<'a, S: Sequence + 'a> {
    state: ReverseState<'a, S>,
    config: QueryConfig,
}

impl<'a, S: Sequence + 'a> Iterator for ReverseCursor<'a, S> {
    type Item = SeqResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                ReverseState::Pending(_) => {
                    let ReverseState::Pending(upstream) =
                        std::mem::replace(&mut self.state, ReverseState::Done)
                    else {
                        return None;
                    };
                    let budget = self.config.budget("reverse");
                    match buffer_all(upstream, &self.config, budget) {
                        Ok(items) => self.state = ReverseState::Draining(items),
                        Err(e) => return Some(Err(e)),
                    }
                }
                ReverseState::Draining(items) => return items.pop().map(Ok),
                ReverseState::Done => return None,
            }
        }
    }
}

impl<S: Sequence> Sequence for Reverse<S> {
    type Item = S::Item;
    type Cursor<'a> = ReverseCursor<'a, S> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ReverseCursor {
            state: ReverseState::Pending(self.source.cursor()),
            config: self.source.config(),
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}
