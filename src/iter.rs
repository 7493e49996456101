use std::{
    fmt::Debug,
    iter::FusedIterator,
    marker::PhantomData,
    mem::MaybeUninit,
};

use crate::{
    offsets::{wrap_backward, wrap_forward, RingOffsets},
    queue::RingQueue,
};

/// Borrowing iterator over the live elements of a ring, head to tail.
///
/// The borrow keeps the ring from being mutated, so the storage cannot be
/// relocated underneath the iterator.
pub struct Iter<'a, T> {
    slots: &'a [MaybeUninit<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [MaybeUninit<T>], offsets: &RingOffsets) -> Self {
        Self {
            slots,
            front: offsets.head(),
            back: offsets.tail(),
            remaining: offsets.len(slots.len()),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let elem = &self.slots[self.front];
        self.front = wrap_forward(self.front, self.slots.len());
        self.remaining -= 1;

        Some(unsafe { elem.assume_init_ref() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.back = wrap_backward(self.back, self.slots.len());
        self.remaining -= 1;

        Some(unsafe { self.slots[self.back].assume_init_ref() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable counterpart of [`Iter`].
pub struct IterMut<'a, T> {
    ptr: *mut MaybeUninit<T>,
    slots: usize,
    front: usize,
    back: usize,
    remaining: usize,
    marker: PhantomData<&'a mut T>,
}

// behaves like `&'a mut [T]`
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slots: &'a mut [MaybeUninit<T>], offsets: &RingOffsets) -> Self {
        let len = slots.len();

        Self {
            ptr: slots.as_mut_ptr(),
            slots: len,
            front: offsets.head(),
            back: offsets.tail(),
            remaining: offsets.len(len),
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.front;
        self.front = wrap_forward(self.front, self.slots);
        self.remaining -= 1;

        // every live slot is yielded at most once, so the borrows never alias
        Some(unsafe { (*self.ptr.add(index)).assume_init_mut() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.back = wrap_backward(self.back, self.slots);
        self.remaining -= 1;

        Some(unsafe { (*self.ptr.add(self.back)).assume_init_mut() })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that drains a ring from the front.
pub struct IntoIter<R> {
    ring: R,
}

impl<R> IntoIter<R> {
    pub(crate) fn new(ring: R) -> Self {
        Self { ring }
    }
}

impl<R> Iterator for IntoIter<R>
where
    R: RingQueue,
    R::Elem: Debug,
{
    type Item = R::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ring.is_empty() {
            return None;
        }

        self.ring.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.size();
        (len, Some(len))
    }
}

impl<R> ExactSizeIterator for IntoIter<R>
where
    R: RingQueue,
    R::Elem: Debug,
{
}

impl<R> FusedIterator for IntoIter<R>
where
    R: RingQueue,
    R::Elem: Debug,
{
}
