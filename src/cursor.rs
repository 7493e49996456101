use crate::{
    error::CursorError,
    offsets::{wrap_backward, wrap_forward, RingOffsets},
};

/// A detached position inside a ring's storage.
///
/// Unlike [`Iter`](crate::Iter), a cursor does not borrow the ring, so it can be
/// held across mutations. It remembers the storage generation it was taken
/// from: once the ring relocates its storage (growth, `clear`, `take`), the
/// cursor is stale and every operation on it fails with
/// [`CursorError::StaleCursorError`].
///
/// Stepping wraps on the physical storage: moving forward from the last slot
/// lands on slot 0, and moving backward from slot 0 lands on the last slot.
/// Traversal stops when the caller reaches the ring's `end()` cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    slot: usize,
    generation: u64,
}

impl Cursor {
    pub(crate) const fn new(slot: usize, generation: u64) -> Self {
        Self { slot, generation }
    }

    #[inline]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn validate(self, generation: u64, slots: usize) -> Result<Self, CursorError> {
        if self.generation != generation {
            return Err(CursorError::StaleCursorError {
                cursor_generation: self.generation,
                ring_generation: generation,
            });
        }

        if self.slot >= slots.max(1) {
            return Err(CursorError::CursorOutOfRangeError(self.slot));
        }

        Ok(self)
    }

    pub(crate) fn forward(self, generation: u64, slots: usize) -> Result<Self, CursorError> {
        let cursor = self.validate(generation, slots)?;
        Ok(Self::new(wrap_forward(cursor.slot, slots), generation))
    }

    pub(crate) fn backward(self, generation: u64, slots: usize) -> Result<Self, CursorError> {
        let cursor = self.validate(generation, slots)?;
        Ok(Self::new(wrap_backward(cursor.slot, slots), generation))
    }

    /// Checks that the cursor points at a live element and returns its slot.
    pub(crate) fn live_slot(
        self,
        generation: u64,
        offsets: &RingOffsets,
        slots: usize,
    ) -> Result<usize, CursorError> {
        let cursor = self.validate(generation, slots)?;

        if !offsets.contains_slot(cursor.slot, slots) {
            return Err(CursorError::CursorOutOfRangeError(cursor.slot));
        }

        Ok(cursor.slot)
    }
}
