//! A circular doubly-linked list whose mutations are driven by cursors.
//!
//! A [`list::List`] owns a sentinel node closing the circle; cursors are
//! checked `(slot, generation)` handles, so a cursor kept across the
//! removal of its node is refused instead of dangling. Pushes and pops
//! work at both ends and at any cursor, two nodes can be swapped in place,
//! the whole chain can be reversed, and [`list::List::sort`] runs an
//! iterative quicksort on top of the same cursor surface.
//!
//! # Examples
//!
//! ```
//! use cursor_list::{List, SortMode};
//!
//! let mut list = List::<i32>::new().unwrap();
//! list.set_less(|a, b| a < b);
//!
//! for value in [5, 3, 8, 1, 9, 2] {
//!     list.try_push_back(value).unwrap();
//! }
//!
//! let mut before = Vec::new();
//! let mut it = list.begin();
//! while it != list.end() {
//!     before.push(*list.at(it).unwrap());
//!     list.increment(&mut it);
//! }
//! assert_eq!(before, vec![5, 3, 8, 1, 9, 2]);
//!
//! list.sort(SortMode::Less).unwrap();
//!
//! let after: Vec<i32> = list.iter().copied().collect();
//! assert_eq!(after, vec![1, 2, 3, 5, 8, 9]);
//! ```

pub mod cursor;
pub mod iter;
pub mod list;
pub(crate) mod node;
pub mod sort;

#[cfg(test)]
mod tests;
