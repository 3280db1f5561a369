extern crate std;

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use std::vec;
use std::vec::Vec;

use crate::allocator::{Allocator, Heap};
use crate::error::ListError;
use crate::list::list::List;

/// Delegates to [`Heap`] until a fixed budget of allocations is spent,
/// then reports exhaustion.
struct BudgetAllocator {
    remaining: Cell<usize>,
    live: Cell<usize>,
}

impl BudgetAllocator {
    fn new(budget: usize) -> Self {
        BudgetAllocator {
            remaining: Cell::new(budget),
            live: Cell::new(0),
        }
    }
}

impl Allocator for BudgetAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if self.remaining.get() == 0 {
            return None;
        }
        self.remaining.set(self.remaining.get() - 1);
        self.live.set(self.live.get() + 1);
        Heap.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        unsafe { Heap.deallocate(ptr, layout) };
    }
}

#[test]
fn test_creation_fails_when_sentinel_allocation_fails() {
    let result = List::<i32, _>::with_allocator(BudgetAllocator::new(0));
    assert_eq!(result.err(), Some(ListError::AllocFailed));
}

#[test]
fn test_push_failure_leaves_list_valid() {
    // One allocation for the sentinel, two for elements.
    let mut list = List::<i32, _>::with_allocator(BudgetAllocator::new(3)).unwrap();
    list.try_push_back(1).unwrap();
    list.try_push_back(2).unwrap();

    assert_eq!(list.try_push_back(3).unwrap_err(), ListError::AllocFailed);
    assert_eq!(list.len(), 2);
    let values: Vec<i32> = list.iter().copied().collect();
    assert_eq!(values, vec![1, 2]);

    let mut it = list.begin();
    assert_eq!(
        list.try_push_at(&mut it, 0).unwrap_err(),
        ListError::AllocFailed
    );
    assert_eq!(list.len(), 2);
}

#[test]
fn test_every_node_goes_back_to_the_allocator() {
    let allocator = BudgetAllocator::new(64);
    {
        let mut list = List::<i32, _>::with_allocator(&allocator).unwrap();
        for value in 0..10 {
            list.try_push_back(value).unwrap();
        }
        for _ in 0..4 {
            list.pop_front();
        }
        // Remaining nodes and the sentinel are released on drop.
    }
    assert_eq!(allocator.live.get(), 0);
}
