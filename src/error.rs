use core::fmt;

/// Errors reported by fallible list operations.
///
/// Every failure is signalled back to the caller; nothing in this crate
/// panics on a refused operation and no partial mutation is left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The element type has size zero; the list stores elements inline in
    /// allocator-provided nodes and refuses zero-sized payloads.
    ZeroSizedElement,
    /// The allocator returned no memory. The list is left in its prior
    /// valid state.
    AllocFailed,
    /// The cursor is stale (its node was freed) or belongs to no live slot.
    InvalidCursor,
    /// The operation requires at least one element.
    EmptyList,
    /// Sorting was requested with a predicate that was never installed.
    PredicateNotSet,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::ZeroSizedElement => write!(f, "element type must not be zero-sized"),
            ListError::AllocFailed => write!(f, "allocator returned no memory"),
            ListError::InvalidCursor => write!(f, "cursor does not reference a live node"),
            ListError::EmptyList => write!(f, "operation requires a non-empty list"),
            ListError::PredicateNotSet => write!(f, "no comparison predicate installed"),
        }
    }
}

impl core::error::Error for ListError {}
