use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError<T>
where
    T: Debug,
{
    #[error("ring is at capacity and the element cannot be pushed")]
    CapacityExceededError(T),

    #[error("ring is empty and no element can be popped")]
    EmptyUnderflowError,
}

impl<T> RingError<T>
where
    T: Debug,
{
    /// Recovers the element handed back by a rejected push.
    pub fn into_inner(self) -> Option<T> {
        match self {
            Self::CapacityExceededError(elem) => Some(elem),
            Self::EmptyUnderflowError => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor from generation {cursor_generation} outlived a storage relocation (ring is at generation {ring_generation})")]
    StaleCursorError {
        cursor_generation: u64,
        ring_generation: u64,
    },

    #[error("cursor at slot {0} does not point at a live element")]
    CursorOutOfRangeError(usize),
}
