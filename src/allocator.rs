use core::alloc::Layout;
use core::ptr::NonNull;

/// A source of node memory for a list.
///
/// Every node allocation and free performed by a list goes through the
/// allocator bound at construction time; no other subsystem allocates on
/// the list's behalf. This keeps pool and arena allocators injectable
/// without code changes to the list itself.
pub trait Allocator {
    /// Allocates a zero-initialized block for `layout`.
    ///
    /// Returns `None` when the allocator is exhausted. `layout` always has
    /// a non-zero size; the list refuses zero-sized elements at creation.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases a block previously returned by [`Allocator::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this same allocator
    /// with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) };
    }
}

/// The default allocator: one heap allocation per node.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heap;

impl Allocator for Heap {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // Safety: the list never asks for a zero-sized layout.
        let ptr = unsafe { alloc::alloc::alloc_zeroed(layout) };
        NonNull::new(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // Safety: forwarded from the caller's contract.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
    }
}
