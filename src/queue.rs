use std::fmt::Debug;

use crate::{
    cursor::Cursor,
    error::{CursorError, RingError},
    iter::Iter,
};

/// The FIFO contract shared by [`FixedRing`](crate::FixedRing) and
/// [`GrowableRing`](crate::GrowableRing).
///
/// Storage is always one slot larger than [`reserved`](RingQueue::reserved);
/// that slot is never live and is what tells a full ring from an empty one.
pub trait RingQueue {
    type Elem: Debug;

    /// Appends at the tail. A fixed ring rejects the element once full and
    /// hands it back inside the error.
    fn push_back(&mut self, elem: Self::Elem) -> Result<(), RingError<Self::Elem>>;

    fn pop_front(&mut self) -> Result<Self::Elem, RingError<Self::Elem>>;

    fn is_empty(&self) -> bool;

    fn size(&self) -> usize;

    /// Logical capacity.
    fn reserved(&self) -> usize;

    fn clear(&mut self);

    fn front(&self) -> Option<&Self::Elem>;

    fn back(&self) -> Option<&Self::Elem>;

    fn iter(&self) -> Iter<'_, Self::Elem>;

    fn begin(&self) -> Cursor;

    fn end(&self) -> Cursor;

    fn next_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError>;

    fn prev_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError>;

    fn get(&self, cursor: Cursor) -> Result<&Self::Elem, CursorError>;

    #[inline]
    fn is_full(&self) -> bool {
        self.size() == self.reserved()
    }
}
