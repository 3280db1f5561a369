/// A forward position in a list.
///
/// A cursor is a non-owning handle: a slot index plus the generation the
/// slot had when the cursor was created. Every operation that takes a
/// cursor validates it against the list first, so a cursor retained across
/// the removal of its node is refused rather than left dangling. The
/// sentinel is a valid cursor value, it denotes the one-past-last position
/// returned by [`List::end`](super::list::List::end) and can never be
/// dereferenced.
///
/// Equality compares node identity. Cursors from two different lists
/// compare by raw handle value; mixing them is caller error, though never
/// memory-unsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

/// A reverse position in a list.
///
/// Mirrors [`Cursor`] with the traversal direction flipped: the first
/// position is the last element and the one-past-last position
/// ([`List::rend`](super::list::List::rend)) is again the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseCursor {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}
