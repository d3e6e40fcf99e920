//! `group_by`: drain upstream into a `Lookup`, then yield its groups in
//! first-seen key order through a result selector.

use lazyq_core::comparer::EqualityComparer;

use super::{Grouping, Lookup};
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct GroupBy<S, KF, EF, RF, C> {
    source: S,
    key: KF,
    element: EF,
    result: RF,
    comparer: C,
}

impl<S, KF, EF, RF, C> GroupBy<S, KF, EF, RF, C> {
    pub fn new(source: S, key: KF, element: EF, result: RF, comparer: C) -> Self {
        Self {
            source,
            key,
            element,
            result,
            comparer,
        }
    }
}

enum GroupState<'a, S: Sequence + 'a, K, V> {
    Pending(S::Cursor<'a>),
    Draining(std::vec::IntoIter<Grouping<K, V>>),
    Done,
}

pub struct GroupByCursor<'a, S: Sequence + 'a, KF, EF, RF, C, K, V> {
    state: GroupState<'a, S, K, V>,
    op: &'a GroupBy<S, KF, EF, RF, C>,
}

impl<'a, S, KF, EF, RF, C, K, V, R> Iterator for GroupByCursor<'a, S, KF, EF, RF, C, K, V>
where
    S: Sequence + 'a,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> V,
    RF: Fn(K, Vec<V>) -> R,
    C: EqualityComparer<K>,
{
    type Item = SeqResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                GroupState::Pending(_) => {
                    let GroupState::Pending(upstream) =
                        std::mem::replace(&mut self.state, GroupState::Done)
                    else {
                        return None;
                    };
                    let config = self.op.source.config();
                    let built = Lookup::build(
                        upstream,
                        &self.op.key,
                        &self.op.element,
                        &self.op.comparer,
                        &config,
                        config.budget("group_by"),
                    );
                    match built {
                        Ok(lookup) => {
                            self.state = GroupState::Draining(lookup.into_groupings().into_iter())
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
                GroupState::Draining(groups) => {
                    let g = groups.next()?;
                    return Some(Ok((self.op.result)(g.key, g.elements)));
                }
                GroupState::Done => return None,
            }
        }
    }
}

impl<S, KF, EF, RF, C, K, V, R> Sequence for GroupBy<S, KF, EF, RF, C>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> V,
    RF: Fn(K, Vec<V>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor<'a> = GroupByCursor<'a, S, KF, EF, RF, C, K, V> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        GroupByCursor {
            state: GroupState::Pending(self.source.cursor()),
            op: self,
        }
    }

    fn config(&self) -> QueryConfig {
        self.source.config()
    }
}
