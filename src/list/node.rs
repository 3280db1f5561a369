use core::mem::MaybeUninit;
use core::ptr::NonNull;

use alloc::vec::Vec;

/// A node of the circular chain.
///
/// The links are never null: an empty list is a sentinel whose `next` and
/// `prev` both point back at itself, and every node's neighbors point back
/// at it at all times. The payload is inline; the sentinel's payload stays
/// uninitialized for the whole lifetime of the list.
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    /// Index of this node's entry in the owning list's slot table.
    pub(crate) slot: u32,
    pub(crate) value: MaybeUninit<T>,
}

/// Maps cursor handles to live nodes.
///
/// A cursor is a `(slot, generation)` pair. Freeing a node bumps its slot's
/// generation, so a retained cursor to a freed node fails the generation
/// check instead of dangling. Slot 0 is the sentinel and is never removed.
pub(crate) struct SlotTable<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
}

struct Entry<T> {
    node: Option<NonNull<Node<T>>>,
    generation: u32,
}

impl<T> SlotTable<T> {
    pub(crate) fn new() -> Self {
        SlotTable {
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Registers a node and returns its slot, reusing a vacant slot when
    /// one exists. Returns `None` if the table is out of slot indices.
    pub(crate) fn insert(&mut self, node: NonNull<Node<T>>) -> Option<u32> {
        if let Some(slot) = self.free.pop() {
            if let Some(entry) = self.entries.get_mut(slot as usize) {
                entry.node = Some(node);
            }
            return Some(slot);
        }

        let slot = u32::try_from(self.entries.len()).ok()?;
        self.entries.push(Entry {
            node: Some(node),
            generation: 0,
        });
        Some(slot)
    }

    /// Vacates a slot and invalidates every cursor bound to it.
    pub(crate) fn remove(&mut self, slot: u32) {
        if let Some(entry) = self.entries.get_mut(slot as usize) {
            entry.node = None;
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(slot);
        }
    }

    /// Resolves a handle, refusing vacated slots and stale generations.
    pub(crate) fn get(&self, slot: u32, generation: u32) -> Option<NonNull<Node<T>>> {
        let entry = self.entries.get(slot as usize)?;
        if entry.generation != generation {
            return None;
        }
        entry.node
    }

    pub(crate) fn generation(&self, slot: u32) -> u32 {
        self.entries.get(slot as usize).map_or(0, |e| e.generation)
    }
}
