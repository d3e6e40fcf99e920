//! Hash join and group join.
//!
//! The inner side is buffered into a `Lookup` when the first outer element
//! arrives; the outer side streams. Key selectors return `Option<K>`, and
//! `None` (an absent key) never matches anything.

use lazyq_core::comparer::EqualityComparer;

use crate::lookup::Lookup;
use crate::traits::{QueryConfig, SeqResult, Sequence};

#[derive(Clone)]
pub struct Join<O, I, OKF, IKF, RF, C> {
    outer: O,
    inner: I,
    outer_key: OKF,
    inner_key: IKF,
    result: RF,
    comparer: C,
}

impl<O, I, OKF, IKF, RF, C> Join<O, I, OKF, IKF, RF, C> {
    pub fn new(
        outer: O,
        inner: I,
        outer_key: OKF,
        inner_key: IKF,
        result: RF,
        comparer: C,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            comparer,
        }
    }
}

/// Buffer the inner side, leaving absent keys out.
fn build_inner<'a, I, IKF, K, C>(
    inner: &'a I,
    inner_key: &'a IKF,
    comparer: &'a C,
    config: &QueryConfig,
    operator: &'static str,
) -> SeqResult<Lookup<K, I::Item, &'a C>>
where
    I: Sequence,
    IKF: Fn(&I::Item) -> Option<K>,
    C: EqualityComparer<K>,
{
    Lookup::build_filtered(
        inner.cursor(),
        |item| inner_key(&item).map(|k| (k, item)),
        comparer,
        config,
        config.budget(operator),
    )
}

pub struct JoinCursor<'a, O: Sequence + 'a, I: Sequence + 'a, OKF, IKF, RF, C, K> {
    op: &'a Join<O, I, OKF, IKF, RF, C>,
    outer: O::Cursor<'a>,
    lookup: Option<Lookup<K, I::Item, &'a C>>,
    // Outer element being expanded, its group, and the next inner position.
    current: Option<(O::Item, usize, usize)>,
    done: bool,
}

impl<'a, O, I, OKF, IKF, RF, C, K, R> Iterator for JoinCursor<'a, O, I, OKF, IKF, RF, C, K>
where
    O: Sequence + 'a,
    I: Sequence + 'a,
    OKF: Fn(&O::Item) -> Option<K>,
    IKF: Fn(&I::Item) -> Option<K>,
    RF: Fn(&O::Item, &I::Item) -> R,
    C: EqualityComparer<K>,
{
    type Item = SeqResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let (Some((outer_item, group, pos)), Some(lookup)) =
                (self.current.as_mut(), self.lookup.as_ref())
            {
                let matches = &lookup.group_at(*group).elements;
                if let Some(inner_item) = matches.get(*pos) {
                    *pos += 1;
                    return Some(Ok((self.op.result)(&*outer_item, inner_item)));
                }
                self.current = None;
            }

            let outer_item = match self.outer.next() {
                Some(Ok(item)) => item,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return None;
                }
            };

            if self.lookup.is_none() {
                let config = self.op.outer.config();
                match build_inner(
                    &self.op.inner,
                    &self.op.inner_key,
                    &self.op.comparer,
                    &config,
                    "join",
                ) {
                    Ok(lookup) => self.lookup = Some(lookup),
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }

            let Some(key) = (self.op.outer_key)(&outer_item) else {
                continue;
            };
            if let Some(group) = self.lookup.as_ref().and_then(|l| l.position(&key)) {
                self.current = Some((outer_item, group, 0));
            }
        }
    }
}

impl<O, I, OKF, IKF, RF, C, K, R> Sequence for Join<O, I, OKF, IKF, RF, C>
where
    O: Sequence,
    I: Sequence,
    OKF: Fn(&O::Item) -> Option<K>,
    IKF: Fn(&I::Item) -> Option<K>,
    RF: Fn(&O::Item, &I::Item) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor<'a> = JoinCursor<'a, O, I, OKF, IKF, RF, C, K> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        JoinCursor {
            op: self,
            outer: self.outer.cursor(),
            lookup: None,
            current: None,
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.outer.config()
    }
}

/// One result per outer element, paired with every matching inner element
/// (an empty slice when nothing matches or the outer key is absent).
#[derive(Clone)]
pub struct GroupJoin<O, I, OKF, IKF, RF, C> {
    outer: O,
    inner: I,
    outer_key: OKF,
    inner_key: IKF,
    result: RF,
    comparer: C,
}

impl<O, I, OKF, IKF, RF, C> GroupJoin<O, I, OKF, IKF, RF, C> {
    pub fn new(
        outer: O,
        inner: I,
        outer_key: OKF,
        inner_key: IKF,
        result: RF,
        comparer: C,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            comparer,
        }
    }
}

pub struct GroupJoinCursor<'a, O: Sequence + 'a, I: Sequence + 'a, OKF, IKF, RF, C, K> {
    op: &'a GroupJoin<O, I, OKF, IKF, RF, C>,
    outer: O::Cursor<'a>,
    lookup: Option<Lookup<K, I::Item, &'a C>>,
    done: bool,
}

impl<'a, O, I, OKF, IKF, RF, C, K, R> Iterator for GroupJoinCursor<'a, O, I, OKF, IKF, RF, C, K>
where
    O: Sequence + 'a,
    I: Sequence + 'a,
    OKF: Fn(&O::Item) -> Option<K>,
    IKF: Fn(&I::Item) -> Option<K>,
    RF: Fn(O::Item, &[I::Item]) -> R,
    C: EqualityComparer<K>,
{
    type Item = SeqResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let outer_item = match self.outer.next() {
            Some(Ok(item)) => item,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e));
            }
            None => {
                self.done = true;
                return None;
            }
        };

        if self.lookup.is_none() {
            let config = self.op.outer.config();
            match build_inner(
                &self.op.inner,
                &self.op.inner_key,
                &self.op.comparer,
                &config,
                "group_join",
            ) {
                Ok(lookup) => self.lookup = Some(lookup),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        let key = (self.op.outer_key)(&outer_item);
        let matches: &[I::Item] = match (key, self.lookup.as_ref()) {
            (Some(key), Some(lookup)) => lookup.get(&key),
            _ => &[],
        };
        Some(Ok((self.op.result)(outer_item, matches)))
    }
}

impl<O, I, OKF, IKF, RF, C, K, R> Sequence for GroupJoin<O, I, OKF, IKF, RF, C>
where
    O: Sequence,
    I: Sequence,
    OKF: Fn(&O::Item) -> Option<K>,
    IKF: Fn(&I::Item) -> Option<K>,
    RF: Fn(O::Item, &[I::Item]) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor<'a> = GroupJoinCursor<'a, O, I, OKF, IKF, RF, C, K> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        GroupJoinCursor {
            op: self,
            outer: self.outer.cursor(),
            lookup: None,
            done: false,
        }
    }

    fn config(&self) -> QueryConfig {
        self.outer.config()
    }
}
