use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;

use crate::allocator::{Allocator, Heap};
use crate::error::ListError;

use super::cursor::{Cursor, ReverseCursor};
use super::iter::Iter;
use super::node::{Node, SlotTable};

/// A comparison predicate over two element payloads.
pub type Predicate<T> = fn(&T, &T) -> bool;

/// A sentinel-based circular doubly-linked list.
///
/// Each element lives in its own node obtained from the allocator `A`.
/// The sentinel node closes the circle and doubles as the one-past-last
/// position in both traversal directions; it never holds data. Cursors
/// ([`Cursor`], [`ReverseCursor`]) are checked handles: operations refuse
/// a cursor whose node has been freed.
pub struct List<T, A: Allocator = Heap> {
    pub(crate) sentinel: NonNull<Node<T>>,
    pub(crate) len: usize,
    pub(crate) table: SlotTable<T>,
    pub(crate) less: Option<Predicate<T>>,
    pub(crate) greater: Option<Predicate<T>>,
    pub(crate) equal: Option<Predicate<T>>,
    alloc: A,
    marker: PhantomData<T>,
}

impl<T> List<T> {
    /// Creates an empty list backed by the heap.
    ///
    /// Fails for zero-sized element types and on allocation failure of the
    /// sentinel node.
    pub fn new() -> Result<Self, ListError> {
        Self::with_allocator(Heap)
    }
}

impl<T, A: Allocator> List<T, A> {
    /// Creates an empty list whose nodes are obtained from `alloc`.
    pub fn with_allocator(alloc: A) -> Result<Self, ListError> {
        if size_of::<T>() == 0 {
            return Err(ListError::ZeroSizedElement);
        }

        let layout = Layout::new::<Node<T>>();
        let sentinel: NonNull<Node<T>> = match alloc.allocate(layout) {
            Some(raw) => raw.cast(),
            None => return Err(ListError::AllocFailed),
        };

        let mut table = SlotTable::new();
        let Some(slot) = table.insert(sentinel) else {
            // Unreachable for a fresh table, but roll the allocation back
            // rather than leak.
            unsafe { alloc.deallocate(sentinel.cast(), layout) };
            return Err(ListError::AllocFailed);
        };

        // Safety: `sentinel` is a fresh, properly aligned block of
        // `Node<T>` size. Its payload stays uninitialized forever.
        unsafe {
            sentinel.as_ptr().write(Node {
                next: sentinel,
                prev: sentinel,
                slot,
                value: MaybeUninit::uninit(),
            });
        }

        Ok(List {
            sentinel,
            len: 0,
            table,
            less: None,
            greater: None,
            equal: None,
            alloc,
            marker: PhantomData,
        })
    }

    /// Installs the strict "less than" predicate used by ascending sort.
    pub fn set_less(&mut self, less: Predicate<T>) {
        self.less = Some(less);
    }

    /// Installs the strict "greater than" predicate used by descending sort.
    pub fn set_greater(&mut self, greater: Predicate<T>) {
        self.greater = Some(greater);
    }

    /// Installs the equality predicate used by [`List::find`].
    pub fn set_equal(&mut self, equal: Predicate<T>) {
        self.equal = Some(equal);
    }

    /// Number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size in bytes of one element payload.
    pub fn element_size(&self) -> usize {
        size_of::<T>()
    }

    //
    //  Node plumbing
    //

    fn first(&self) -> NonNull<Node<T>> {
        unsafe { self.sentinel.as_ref().next }
    }

    fn last(&self) -> NonNull<Node<T>> {
        unsafe { self.sentinel.as_ref().prev }
    }

    /// Allocates a node holding `value`, registered in the slot table but
    /// not yet linked into the chain. On failure `value` is dropped and
    /// nothing is left allocated.
    fn new_node(&mut self, value: T) -> Option<NonNull<Node<T>>> {
        let layout = Layout::new::<Node<T>>();
        let node: NonNull<Node<T>> = self.alloc.allocate(layout)?.cast();

        let Some(slot) = self.table.insert(node) else {
            unsafe { self.alloc.deallocate(node.cast(), layout) };
            return None;
        };

        // Safety: fresh allocation of the right layout; links are patched
        // by the caller's splice.
        unsafe {
            node.as_ptr().write(Node {
                next: node,
                prev: node,
                slot,
                value: MaybeUninit::new(value),
            });
        }

        Some(node)
    }

    /// Splices `node` immediately before `anchor`.
    ///
    /// # Safety
    ///
    /// Both pointers must reference live nodes of this list, and `node`
    /// must currently be detached from the chain.
    unsafe fn link_before(&mut self, node: NonNull<Node<T>>, anchor: NonNull<Node<T>>) {
        unsafe {
            let prev = (*anchor.as_ptr()).prev;
            (*node.as_ptr()).next = anchor;
            (*node.as_ptr()).prev = prev;
            (*prev.as_ptr()).next = node;
            (*anchor.as_ptr()).prev = node;
        }
    }

    /// Unlinks `node` from the chain, leaving its own links stale.
    ///
    /// # Safety
    ///
    /// `node` must reference a live, linked, non-sentinel node of this list.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) {
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
        }
    }

    /// Vacates the node's slot, reads the payload out and releases the
    /// node's memory.
    ///
    /// # Safety
    ///
    /// `node` must be an unlinked, live, non-sentinel node of this list
    /// with an initialized payload, and must not be used afterwards.
    unsafe fn free_node(&mut self, node: NonNull<Node<T>>) -> T {
        let layout = Layout::new::<Node<T>>();
        unsafe {
            self.table.remove((*node.as_ptr()).slot);
            let value = (*node.as_ptr()).value.assume_init_read();
            self.alloc.deallocate(node.cast(), layout);
            value
        }
    }

    pub(crate) fn resolve(&self, slot: u32, generation: u32) -> Option<NonNull<Node<T>>> {
        self.table.get(slot, generation)
    }

    /// Like [`List::resolve`] but additionally refuses the sentinel.
    pub(crate) fn resolve_element(&self, slot: u32, generation: u32) -> Option<NonNull<Node<T>>> {
        let node = self.table.get(slot, generation)?;
        (node != self.sentinel).then_some(node)
    }

    pub(crate) fn cursor_of(&self, node: NonNull<Node<T>>) -> Cursor {
        let slot = unsafe { (*node.as_ptr()).slot };
        Cursor {
            slot,
            generation: self.table.generation(slot),
        }
    }

    fn rcursor_of(&self, node: NonNull<Node<T>>) -> ReverseCursor {
        let slot = unsafe { (*node.as_ptr()).slot };
        ReverseCursor {
            slot,
            generation: self.table.generation(slot),
        }
    }

    //
    //  Pushing and popping
    //

    /// Prepends `value`, returning a handle to the stored payload.
    ///
    /// On allocation failure the list is unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<&mut T, ListError> {
        let anchor = self.first();
        self.push_before(anchor, value)
    }

    /// Appends `value`, returning a handle to the stored payload.
    pub fn try_push_back(&mut self, value: T) -> Result<&mut T, ListError> {
        let anchor = self.sentinel;
        self.push_before(anchor, value)
    }

    /// Splices a new node holding `value` immediately before the cursor's
    /// node, then rebinds the cursor to the new node. Repeated calls
    /// therefore walk the cursor backward over the freshly inserted run.
    pub fn try_push_at(&mut self, cursor: &mut Cursor, value: T) -> Result<&mut T, ListError> {
        let anchor = self
            .resolve(cursor.slot, cursor.generation)
            .ok_or(ListError::InvalidCursor)?;
        let node = self.new_node(value).ok_or(ListError::AllocFailed)?;
        unsafe { self.link_before(node, anchor) };
        self.len += 1;
        *cursor = self.cursor_of(node);
        Ok(unsafe { (*node.as_ptr()).value.assume_init_mut() })
    }

    /// Splices a new node holding `value` immediately after the reverse
    /// cursor's node, then rebinds the cursor to the new node.
    pub fn try_rpush_at(
        &mut self,
        cursor: &mut ReverseCursor,
        value: T,
    ) -> Result<&mut T, ListError> {
        let anchor = self
            .resolve(cursor.slot, cursor.generation)
            .ok_or(ListError::InvalidCursor)?;
        let next = unsafe { (*anchor.as_ptr()).next };
        let node = self.new_node(value).ok_or(ListError::AllocFailed)?;
        unsafe { self.link_before(node, next) };
        self.len += 1;
        *cursor = self.rcursor_of(node);
        Ok(unsafe { (*node.as_ptr()).value.assume_init_mut() })
    }

    fn push_before(
        &mut self,
        anchor: NonNull<Node<T>>,
        value: T,
    ) -> Result<&mut T, ListError> {
        let node = self.new_node(value).ok_or(ListError::AllocFailed)?;
        unsafe { self.link_before(node, anchor) };
        self.len += 1;
        Ok(unsafe { (*node.as_ptr()).value.assume_init_mut() })
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.first();
        if first == self.sentinel {
            return None;
        }
        unsafe { self.unlink(first) };
        self.len -= 1;
        Some(unsafe { self.free_node(first) })
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.last();
        if last == self.sentinel {
            return None;
        }
        unsafe { self.unlink(last) };
        self.len -= 1;
        Some(unsafe { self.free_node(last) })
    }

    /// Removes the cursor's node and advances the cursor to the removed
    /// node's successor. Refuses the sentinel and stale cursors.
    pub fn pop_at(&mut self, cursor: &mut Cursor) -> Option<T> {
        let node = self.resolve_element(cursor.slot, cursor.generation)?;
        let next = unsafe { (*node.as_ptr()).next };
        unsafe { self.unlink(node) };
        self.len -= 1;
        let value = unsafe { self.free_node(node) };
        *cursor = self.cursor_of(next);
        Some(value)
    }

    /// Removes the reverse cursor's node and advances the cursor to the
    /// removed node's predecessor.
    pub fn rpop_at(&mut self, cursor: &mut ReverseCursor) -> Option<T> {
        let node = self.resolve_element(cursor.slot, cursor.generation)?;
        let prev = unsafe { (*node.as_ptr()).prev };
        unsafe { self.unlink(node) };
        self.len -= 1;
        let value = unsafe { self.free_node(node) };
        *cursor = self.rcursor_of(prev);
        Some(value)
    }

    //
    //  Cursors and movement
    //

    /// Cursor at the first element, or [`List::end`] when empty.
    pub fn begin(&self) -> Cursor {
        self.cursor_of(self.first())
    }

    /// The one-past-last position: the sentinel.
    pub fn end(&self) -> Cursor {
        self.cursor_of(self.sentinel)
    }

    /// Reverse cursor at the last element, or [`List::rend`] when empty.
    pub fn rbegin(&self) -> ReverseCursor {
        self.rcursor_of(self.last())
    }

    pub fn rend(&self) -> ReverseCursor {
        self.rcursor_of(self.sentinel)
    }

    /// Returns the position after `cursor`. At [`List::end`] (and for a
    /// stale cursor) the cursor is returned unchanged: movement never
    /// wraps past the sentinel.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.sentinel => {
                self.cursor_of(unsafe { (*node.as_ptr()).next })
            }
            _ => cursor,
        }
    }

    /// Returns the position before `cursor`, refusing to move before the
    /// first element.
    pub fn previous(&self, cursor: Cursor) -> Cursor {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.first() => {
                self.cursor_of(unsafe { (*node.as_ptr()).prev })
            }
            _ => cursor,
        }
    }

    /// Returns the reverse position after `cursor` (one step toward the
    /// front of the list).
    pub fn rnext(&self, cursor: ReverseCursor) -> ReverseCursor {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.sentinel => {
                self.rcursor_of(unsafe { (*node.as_ptr()).prev })
            }
            _ => cursor,
        }
    }

    /// Returns the reverse position before `cursor`, refusing to move
    /// before [`List::rbegin`].
    pub fn rprevious(&self, cursor: ReverseCursor) -> ReverseCursor {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.last() => {
                self.rcursor_of(unsafe { (*node.as_ptr()).next })
            }
            _ => cursor,
        }
    }

    /// Advances the cursor in place. Returns `false` instead of moving
    /// past [`List::end`].
    pub fn increment(&self, cursor: &mut Cursor) -> bool {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.sentinel => {
                *cursor = self.cursor_of(unsafe { (*node.as_ptr()).next });
                true
            }
            _ => false,
        }
    }

    /// Moves the cursor back in place. Returns `false` instead of moving
    /// before [`List::begin`].
    pub fn decrement(&self, cursor: &mut Cursor) -> bool {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.first() => {
                *cursor = self.cursor_of(unsafe { (*node.as_ptr()).prev });
                true
            }
            _ => false,
        }
    }

    /// Advances the reverse cursor in place toward [`List::rend`].
    pub fn rincrement(&self, cursor: &mut ReverseCursor) -> bool {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.sentinel => {
                *cursor = self.rcursor_of(unsafe { (*node.as_ptr()).prev });
                true
            }
            _ => false,
        }
    }

    /// Moves the reverse cursor back in place toward [`List::rbegin`].
    pub fn rdecrement(&self, cursor: &mut ReverseCursor) -> bool {
        match self.resolve(cursor.slot, cursor.generation) {
            Some(node) if node != self.last() => {
                *cursor = self.rcursor_of(unsafe { (*node.as_ptr()).next });
                true
            }
            _ => false,
        }
    }

    //
    //  Element access
    //

    /// Payload at the cursor, refusing the sentinel and stale cursors.
    pub fn at(&self, cursor: Cursor) -> Option<&T> {
        let node = self.resolve_element(cursor.slot, cursor.generation)?;
        Some(unsafe { (*node.as_ptr()).value.assume_init_ref() })
    }

    /// Mutable payload at the cursor.
    pub fn at_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let node = self.resolve_element(cursor.slot, cursor.generation)?;
        Some(unsafe { (*node.as_ptr()).value.assume_init_mut() })
    }

    /// Payload at the reverse cursor.
    pub fn rat(&self, cursor: ReverseCursor) -> Option<&T> {
        let node = self.resolve_element(cursor.slot, cursor.generation)?;
        Some(unsafe { (*node.as_ptr()).value.assume_init_ref() })
    }

    /// Mutable payload at the reverse cursor.
    pub fn rat_mut(&mut self, cursor: ReverseCursor) -> Option<&mut T> {
        let node = self.resolve_element(cursor.slot, cursor.generation)?;
        Some(unsafe { (*node.as_ptr()).value.assume_init_mut() })
    }

    pub fn front(&self) -> Option<&T> {
        let first = self.first();
        (first != self.sentinel).then(|| unsafe { (*first.as_ptr()).value.assume_init_ref() })
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let first = self.first();
        (first != self.sentinel).then(|| unsafe { (*first.as_ptr()).value.assume_init_mut() })
    }

    pub fn back(&self) -> Option<&T> {
        let last = self.last();
        (last != self.sentinel).then(|| unsafe { (*last.as_ptr()).value.assume_init_ref() })
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.last();
        (last != self.sentinel).then(|| unsafe { (*last.as_ptr()).value.assume_init_mut() })
    }

    /// Cursor at the first element equal to `value` under the installed
    /// `equal` predicate, or `None` when absent or no predicate is set.
    pub fn find(&self, value: &T) -> Option<Cursor> {
        let equal = self.equal?;
        let mut cursor = self.begin();
        while cursor != self.end() {
            if let Some(element) = self.at(cursor) {
                if equal(element, value) {
                    return Some(cursor);
                }
            }
            cursor = self.next(cursor);
        }
        None
    }

    /// Iterator over shared references to the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self, self.first(), self.last(), self.len)
    }

    //
    //  Structural rearrangement
    //

    /// Detaches the node referenced by `element` and splices it
    /// immediately before `position`'s node.
    ///
    /// `position` is left referencing the moved node, so repeated calls
    /// build a run in order; `element` is advanced to the moved node's
    /// former successor, so one pass can relocate every element matching
    /// some criterion. Refuses stale cursors, the sentinel as the element,
    /// and the degenerate case of both cursors on the same node.
    pub fn insert_before(&mut self, position: &mut Cursor, element: &mut Cursor) -> bool {
        let Some(pos_node) = self.resolve(position.slot, position.generation) else {
            return false;
        };
        let Some(elem_node) = self.resolve_element(element.slot, element.generation) else {
            return false;
        };
        if pos_node == elem_node {
            return false;
        }

        let successor = unsafe { (*elem_node.as_ptr()).next };
        unsafe {
            self.unlink(elem_node);
            self.link_before(elem_node, pos_node);
        }

        *position = self.cursor_of(elem_node);
        *element = self.cursor_of(successor);
        true
    }

    /// Exchanges the chain positions of the two referenced nodes in place,
    /// then exchanges the two cursor values.
    ///
    /// The two *passed* cursors thus keep denoting their original chain
    /// positions, while any other retained cursor keeps following its
    /// element to the element's new position. Refuses the sentinel.
    pub fn swap(&mut self, a: &mut Cursor, b: &mut Cursor) -> bool {
        let Some(node_a) = self.resolve_element(a.slot, a.generation) else {
            return false;
        };
        let Some(node_b) = self.resolve_element(b.slot, b.generation) else {
            return false;
        };
        if node_a == node_b {
            mem::swap(a, b);
            return true;
        }

        // The statement order below also makes the two adjacency cases
        // (a right before b, b right before a) come out relinked correctly.
        unsafe {
            let pa = node_a.as_ptr();
            let pb = node_b.as_ptr();

            let tmp = (*pa).next;
            (*(*pa).next.as_ptr()).prev = node_b;
            (*(*pb).next.as_ptr()).prev = node_a;
            (*pa).next = (*pb).next;
            (*pb).next = tmp;

            let tmp = (*pa).prev;
            (*(*pa).prev.as_ptr()).next = node_b;
            (*(*pb).prev.as_ptr()).next = node_a;
            (*pa).prev = (*pb).prev;
            (*pb).prev = tmp;
        }

        mem::swap(a, b);
        true
    }

    /// Reverses the whole chain in O(n) by flipping every node's links and
    /// then the sentinel's own. Refuses an empty list.
    pub fn reverse(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }

        unsafe {
            let mut current = self.first();
            while current != self.sentinel {
                let next = (*current.as_ptr()).next;
                (*current.as_ptr()).next = (*current.as_ptr()).prev;
                (*current.as_ptr()).prev = next;
                current = next;
            }

            let sentinel = self.sentinel.as_ptr();
            mem::swap(&mut (*sentinel).next, &mut (*sentinel).prev);
        }

        true
    }
}

impl<T, A: Allocator> Drop for List<T, A> {
    fn drop(&mut self) {
        let layout = Layout::new::<Node<T>>();
        unsafe {
            let mut current = self.first();
            while current != self.sentinel {
                let next = (*current.as_ptr()).next;
                (*current.as_ptr()).value.assume_init_drop();
                self.alloc.deallocate(current.cast(), layout);
                current = next;
            }
            self.alloc.deallocate(self.sentinel.cast(), layout);
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Send, A: Allocator + Send> Send for List<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for List<T, A> {}
