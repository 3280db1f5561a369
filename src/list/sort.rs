use alloc::vec::Vec;

use crate::allocator::Allocator;
use crate::error::ListError;

use super::cursor::Cursor;
use super::list::{List, Predicate};

/// Selects which installed predicate drives [`List::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Order by the `less` predicate.
    Less,
    /// Order by the `greater` predicate.
    Greater,
}

/// Initial capacity of the range stack. The source design capped the
/// depth at this value without checking it; the stack grows instead.
const STACK_CAPACITY: usize = 32;

impl<T, A: Allocator> List<T, A> {
    /// Sorts the list in place with an iterative quicksort.
    ///
    /// The algorithm runs entirely on the cursor surface: an explicit
    /// stack of `(begin, end)` cursor ranges, a median-of-three pivot over
    /// (begin, begin.next, end) and a partition that physically relinks
    /// mismatched element pairs through [`List::swap`]. Equal elements may
    /// be reordered; the sort is not stable.
    ///
    /// The installed predicate must be a strict ordering (irreflexive);
    /// `<=`-style predicates can stall the partition.
    ///
    /// Fails on an empty list and when the predicate selected by `mode`
    /// was never installed.
    pub fn sort(&mut self, mode: SortMode) -> Result<(), ListError> {
        if self.is_empty() {
            return Err(ListError::EmptyList);
        }

        let predicate = match mode {
            SortMode::Less => self.less,
            SortMode::Greater => self.greater,
        }
        .ok_or(ListError::PredicateNotSet)?;

        let mut stack: Vec<(Cursor, Cursor)> = Vec::with_capacity(STACK_CAPACITY);
        stack.push((self.begin(), self.previous(self.end())));

        while let Some((mut begin, mut end)) = stack.pop() {
            if begin == end {
                continue;
            }

            let second = self.next(begin);
            if second == end {
                // Two elements: one compare, one conditional swap.
                if self.compare(predicate, second, begin) {
                    let swapped = self.swap(&mut end, &mut begin);
                    debug_assert!(swapped);
                }
                continue;
            }

            let pivot = self.pivot(begin, end, predicate);

            // Count of elements consumed from the begin side and from the
            // end side; decides which sub-range is revisited later.
            let mut fore = 0usize;
            let mut aft = 0usize;

            let mut it = begin;
            while it != end {
                aft = 1;
                if self.compare(predicate, pivot, it) {
                    aft = 0;
                    let mut exhausted = true;
                    let mut rit = end;
                    while rit != it {
                        if !self.compare(predicate, pivot, rit) {
                            // Keep the range anchored when one of its
                            // boundary nodes is about to change position.
                            if begin == it {
                                begin = rit;
                            }
                            if end == rit {
                                end = it;
                            }
                            let swapped = self.swap(&mut it, &mut rit);
                            debug_assert!(swapped);
                            exhausted = false;
                            break;
                        }
                        aft += 1;
                        self.decrement(&mut rit);
                    }
                    if exhausted {
                        break;
                    }
                }
                fore += 1;
                self.increment(&mut it);
            }

            // The sub-range pushed last is partitioned next; the one with
            // fewer consumed elements waits, bounding stack growth.
            if aft < fore {
                stack.push((begin, self.previous(it)));
                stack.push((it, end));
            } else {
                stack.push((it, end));
                stack.push((begin, self.previous(it)));
            }
        }

        Ok(())
    }

    /// Median-of-three pivot over (begin, begin.next, end).
    fn pivot(&self, begin: Cursor, end: Cursor, predicate: Predicate<T>) -> Cursor {
        let second = self.next(begin);
        let third = end;

        if self.compare(predicate, begin, second) {
            if self.compare(predicate, begin, third) {
                if self.compare(predicate, second, third) {
                    second
                } else {
                    third
                }
            } else {
                third
            }
        } else if self.compare(predicate, second, third) {
            if self.compare(predicate, begin, third) {
                begin
            } else {
                third
            }
        } else {
            second
        }
    }

    /// Applies the predicate to the payloads at two cursors. In-range
    /// cursors always dereference; anything else compares as `false`.
    fn compare(&self, predicate: Predicate<T>, a: Cursor, b: Cursor) -> bool {
        match (self.at(a), self.at(b)) {
            (Some(x), Some(y)) => predicate(x, y),
            _ => false,
        }
    }
}
