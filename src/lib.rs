//! A sentinel-based circular doubly-linked list driven by cursors.
//!
//! The [`list::list::List`] container stores each element in its own
//! allocator-provided node and exposes every mutation through cursor
//! positions: pushing and popping at either end, splicing at an arbitrary
//! cursor, swapping two nodes in place, whole-list reversal and an
//! in-place iterative quicksort built on top of the cursor surface.
//!
//! Node memory is obtained exclusively through an [`allocator::Allocator`]
//! bound at construction time, so pool or arena allocators can be injected
//! without touching the list logic.

#![no_std]

extern crate alloc;

pub mod allocator;
pub mod error;
pub mod list;

pub use allocator::{Allocator, Heap};
pub use error::ListError;
pub use list::cursor::{Cursor, ReverseCursor};
pub use list::iter::Iter;
pub use list::list::{List, Predicate};
pub use list::sort::SortMode;
