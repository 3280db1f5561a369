use core::ptr::NonNull;

use crate::allocator::Allocator;

use super::list::List;
use super::node::Node;

/// A double-ended iterator over shared references to a list's elements.
///
/// Created by [`List::iter`]. The borrow of the list guarantees that no
/// node is freed while the iterator is alive.
pub struct Iter<'a, T, A: Allocator> {
    _list: &'a List<T, A>,
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    remaining: usize,
}

impl<'a, T, A: Allocator> Iter<'a, T, A> {
    pub(crate) fn new(
        list: &'a List<T, A>,
        head: NonNull<Node<T>>,
        tail: NonNull<Node<T>>,
        remaining: usize,
    ) -> Self {
        Iter {
            _list: list,
            head,
            tail,
            remaining,
        }
    }
}

impl<'a, T, A: Allocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.head;
        // Safety: `remaining > 0`, so `head` references a live element
        // node whose payload is initialized; the list is borrowed for 'a.
        let element = unsafe { (*node.as_ptr()).value.assume_init_ref() };
        self.head = unsafe { (*node.as_ptr()).next };
        self.remaining -= 1;

        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, A: Allocator> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.tail;
        // Safety: as in `next`, but walking backward from the tail.
        let element = unsafe { (*node.as_ptr()).value.assume_init_ref() };
        self.tail = unsafe { (*node.as_ptr()).prev };
        self.remaining -= 1;

        Some(element)
    }
}

impl<T, A: Allocator> ExactSizeIterator for Iter<'_, T, A> {}
