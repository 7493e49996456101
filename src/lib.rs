//! FIFO ring queues with one reserved slot.
//!
//! Both rings keep their elements in storage one slot larger than their
//! logical capacity. `head == tail` means empty; a ring is full when the tail
//! sits right behind the head.
//!
//! * [`FixedRing`] stores `N + 1` slots inline and rejects pushes once full.
//! * [`GrowableRing`] stores `capacity + 1` slots on the heap and doubles its
//!   capacity when a push finds it full.
//!
//! ```
//! use ring_queue::{FixedRing, GrowableRing};
//!
//! let mut fixed: FixedRing<u32, 3> = FixedRing::new();
//! for i in 1..=3 {
//!     fixed.push_back(i).unwrap();
//! }
//! assert!(fixed.push_back(4).is_err());
//! assert_eq!(fixed.pop_front(), Ok(1));
//!
//! let mut growable = GrowableRing::new(2);
//! growable.extend([1, 2, 3]);
//! assert_eq!(growable.reserved(), 4);
//! assert_eq!(growable.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```

mod cursor;
mod fixed;
mod growable;
mod iter;
mod offsets;
mod queue;

pub mod error;

pub use cursor::Cursor;
pub use fixed::*;
pub use growable::*;
pub use iter::{IntoIter, Iter, IterMut};
pub use queue::RingQueue;
