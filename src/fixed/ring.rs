use std::fmt::{self, Debug};

use tracing::{trace, warn};

use super::slots::Slots;
use crate::{
    cursor::Cursor,
    error::{CursorError, RingError},
    iter::{IntoIter, Iter, IterMut},
    offsets::{wrap_forward, RingOffsets},
    queue::RingQueue,
};

/// Ring queue holding at most `N` elements in inline storage.
///
/// Never allocates. Pushing into a full ring is rejected and the element is
/// handed back in [`RingError::CapacityExceededError`].
pub struct FixedRing<T, const N: usize>
where
    T: Debug,
{
    offsets: RingOffsets,
    slots: Slots<T, N>,
}

impl<T, const N: usize> FixedRing<T, N>
where
    T: Debug,
{
    const SLOTS: usize = Slots::<T, N>::LEN;

    pub fn new() -> Self {
        Self {
            offsets: RingOffsets::default(),
            slots: Slots::uninit(),
        }
    }

    #[inline]
    pub const fn reserved(&self) -> usize {
        N
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.offsets.len(Self::SLOTS)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.offsets.is_full(Self::SLOTS)
    }

    #[inline]
    fn set_element(&mut self, index: usize, elem: T) {
        self.slots.as_mut_slice()[index].write(elem);
    }

    #[inline]
    fn take_element(&mut self, index: usize) -> T {
        let elem = &mut self.slots.as_mut_slice()[index];
        unsafe { elem.assume_init_read() }
    }

    #[inline]
    fn element(&self, index: usize) -> &T {
        unsafe { self.slots.as_slice()[index].assume_init_ref() }
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> &mut T {
        unsafe { self.slots.as_mut_slice()[index].assume_init_mut() }
    }

    #[inline]
    fn debug_check_invariants(&self) {
        debug_assert_eq!(self.slots.as_slice().len(), N + 1);
        debug_assert!(self.offsets.head() <= N && self.offsets.tail() <= N);
        debug_assert!(self.size() <= N);
    }

    pub fn push_back(&mut self, elem: T) -> Result<(), RingError<T>> {
        if self.is_full() {
            warn!(capacity = N, "fixed ring is full, rejecting push_back");
            return Err(RingError::CapacityExceededError(elem));
        }

        let index = self.offsets.tail();
        self.set_element(index, elem);
        self.offsets.tail_forward(Self::SLOTS);

        self.debug_check_invariants();
        Ok(())
    }

    pub fn pop_front(&mut self) -> Result<T, RingError<T>> {
        if self.is_empty() {
            warn!(capacity = N, "fixed ring is empty, rejecting pop_front");
            return Err(RingError::EmptyUnderflowError);
        }

        let index = self.offsets.head();
        self.offsets.head_forward(Self::SLOTS);
        let elem = self.take_element(index);

        self.debug_check_invariants();
        Ok(elem)
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        Some(self.element(self.offsets.head()))
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }

        Some(self.element_mut(self.offsets.head()))
    }

    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        Some(self.element(self.offsets.back_slot(Self::SLOTS)))
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }

        Some(self.element_mut(self.offsets.back_slot(Self::SLOTS)))
    }

    pub fn clear(&mut self) {
        let mut index = self.offsets.head();
        let tail = self.offsets.tail();

        // indices go first so a panicking destructor leaks instead of double dropping
        self.offsets.reset();

        while index != tail {
            unsafe { self.slots.as_mut_slice()[index].assume_init_drop() };
            index = wrap_forward(index, Self::SLOTS);
        }

        trace!(capacity = N, "cleared fixed ring");
        self.debug_check_invariants();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.slots.as_slice(), &self.offsets)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let offsets = self.offsets;
        IterMut::new(self.slots.as_mut_slice(), &offsets)
    }

    /// Cursor at the head. Equal to [`end`](Self::end) when empty.
    #[inline]
    pub const fn begin(&self) -> Cursor {
        Cursor::new(self.offsets.head(), 0)
    }

    /// Cursor at the tail, one past the last element.
    #[inline]
    pub const fn end(&self) -> Cursor {
        Cursor::new(self.offsets.tail(), 0)
    }

    pub fn next_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        cursor.forward(0, Self::SLOTS)
    }

    pub fn prev_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        cursor.backward(0, Self::SLOTS)
    }

    pub fn get(&self, cursor: Cursor) -> Result<&T, CursorError> {
        let index = cursor.live_slot(0, &self.offsets, Self::SLOTS)?;
        Ok(self.element(index))
    }
}

impl<T, const N: usize> Default for FixedRing<T, N>
where
    T: Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for FixedRing<T, N>
where
    T: Debug,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Clone for FixedRing<T, N>
where
    T: Clone + Debug,
{
    fn clone(&self) -> Self {
        let head = self.offsets.head();

        // the clone only ever tracks fully written slots, so a panicking
        // `T::clone` drops exactly what was cloned so far
        let mut cloned = Self {
            offsets: RingOffsets::new(head, head),
            slots: Slots::uninit(),
        };

        for elem in self.iter() {
            cloned.set_element(cloned.offsets.tail(), elem.clone());
            cloned.offsets.tail_forward(Self::SLOTS);
        }

        cloned.debug_check_invariants();
        cloned
    }
}

impl<T, const N: usize> Debug for FixedRing<T, N>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> PartialEq for FixedRing<T, N>
where
    T: Debug + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T, const N: usize> Eq for FixedRing<T, N> where T: Debug + Eq {}

impl<'a, T, const N: usize> IntoIterator for &'a FixedRing<T, N>
where
    T: Debug,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedRing<T, N>
where
    T: Debug,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const N: usize> IntoIterator for FixedRing<T, N>
where
    T: Debug,
{
    type Item = T;
    type IntoIter = IntoIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T, const N: usize> RingQueue for FixedRing<T, N>
where
    T: Debug,
{
    type Elem = T;

    fn push_back(&mut self, elem: T) -> Result<(), RingError<T>> {
        FixedRing::push_back(self, elem)
    }

    fn pop_front(&mut self) -> Result<T, RingError<T>> {
        FixedRing::pop_front(self)
    }

    fn is_empty(&self) -> bool {
        FixedRing::is_empty(self)
    }

    fn size(&self) -> usize {
        FixedRing::size(self)
    }

    fn reserved(&self) -> usize {
        FixedRing::reserved(self)
    }

    fn clear(&mut self) {
        FixedRing::clear(self)
    }

    fn front(&self) -> Option<&T> {
        FixedRing::front(self)
    }

    fn back(&self) -> Option<&T> {
        FixedRing::back(self)
    }

    fn iter(&self) -> Iter<'_, T> {
        FixedRing::iter(self)
    }

    fn begin(&self) -> Cursor {
        FixedRing::begin(self)
    }

    fn end(&self) -> Cursor {
        FixedRing::end(self)
    }

    fn next_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        FixedRing::next_cursor(self, cursor)
    }

    fn prev_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        FixedRing::prev_cursor(self, cursor)
    }

    fn get(&self, cursor: Cursor) -> Result<&T, CursorError> {
        FixedRing::get(self, cursor)
    }

    fn is_full(&self) -> bool {
        FixedRing::is_full(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    #[derive(Debug)]
    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn new_ring_is_empty() {
        let ring: FixedRing<usize, 4> = FixedRing::new();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.size(), 0);
        assert_eq!(ring.reserved(), 4);
        assert!(ring.front().is_none());
        assert!(ring.back().is_none());
        assert_eq!(ring.begin(), ring.end());
    }

    #[test]
    fn push_until_full() {
        let mut ring: FixedRing<usize, 4> = FixedRing::new();

        for i in 0..4 {
            assert!(ring.push_back(i).is_ok());
            assert_eq!(ring.size(), i + 1);
            assert!(!ring.is_empty());
        }

        assert!(ring.is_full());
        assert_eq!(
            ring.push_back(4),
            Err(RingError::CapacityExceededError(4))
        );
        assert_eq!(ring.size(), 4);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn pop_empty_is_rejected() {
        let mut ring: FixedRing<usize, 2> = FixedRing::new();
        assert_eq!(ring.pop_front(), Err(RingError::EmptyUnderflowError));
        assert!(ring.is_empty());
        assert_eq!(ring.begin().slot(), 0);
    }

    #[test]
    fn capacity_three_scenario() {
        let mut ring: FixedRing<usize, 3> = FixedRing::new();

        ring.push_back(1).unwrap();
        ring.push_back(2).unwrap();
        ring.push_back(3).unwrap();
        assert_eq!(ring.size(), 3);
        assert!(!ring.is_empty());

        assert!(ring.push_back(4).is_err());
        assert_eq!(ring.size(), 3);

        assert_eq!(ring.pop_front(), Ok(1));
        assert_eq!(ring.size(), 2);
        assert_eq!(ring.front(), Some(&2));

        ring.push_back(4).unwrap();
        assert_eq!(ring.size(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(ring.back(), Some(&4));
    }

    #[test]
    fn wrapping_indices() {
        let mut ring: FixedRing<usize, 3> = FixedRing::new();

        // [n, n, 2, 3] then [4, n, 2, 3]
        for i in 0..4 {
            ring.push_back(i).unwrap();
            if i < 2 {
                ring.pop_front().unwrap();
            }
        }
        assert_eq!(ring.begin().slot(), 2);
        assert_eq!(ring.end().slot(), 0);
        assert_eq!(ring.size(), 2);

        ring.push_back(4).unwrap();
        assert!(ring.is_full());
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(ring.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut ring: FixedRing<usize, 0> = FixedRing::new();
        assert!(ring.is_full());
        assert!(ring.is_empty());
        assert_eq!(ring.push_back(1), Err(RingError::CapacityExceededError(1)));
        assert_eq!(ring.pop_front(), Err(RingError::EmptyUnderflowError));
    }

    #[test]
    fn front_and_back_mut() {
        let mut ring: FixedRing<usize, 3> = FixedRing::new();
        ring.push_back(1).unwrap();
        ring.push_back(2).unwrap();

        *ring.front_mut().unwrap() = 10;
        *ring.back_mut().unwrap() = 20;

        for elem in &mut ring {
            *elem += 1;
        }

        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![11, 21]);
    }

    #[test]
    fn cursor_traversal() {
        let mut ring: FixedRing<usize, 3> = FixedRing::new();
        for i in 0..3 {
            ring.push_back(i).unwrap();
        }
        ring.pop_front().unwrap();
        ring.push_back(3).unwrap();

        let mut seen = Vec::new();
        let mut cursor = ring.begin();
        while cursor != ring.end() {
            seen.push(*ring.get(cursor).unwrap());
            cursor = ring.next_cursor(cursor).unwrap();
        }
        assert_eq!(seen, vec![1, 2, 3]);

        // the end cursor sits on the reserved slot
        assert_eq!(
            ring.get(ring.end()),
            Err(CursorError::CursorOutOfRangeError(0))
        );

        // stepping back from slot 0 wraps onto the last physical slot
        let last = ring.prev_cursor(ring.end()).unwrap();
        assert_eq!(last.slot(), 3);
        assert_eq!(ring.get(last), Ok(&3));
    }

    #[test]
    fn clone_is_independent() {
        let mut a: FixedRing<String, 3> = FixedRing::new();
        a.push_back("x".to_owned()).unwrap();
        a.push_back("y".to_owned()).unwrap();
        a.pop_front().unwrap();
        a.push_back("z".to_owned()).unwrap();

        let mut b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.begin(), b.begin());

        b.pop_front().unwrap();
        b.push_back("w".to_owned()).unwrap();

        assert_eq!(a.size(), 2);
        assert_eq!(a.iter().cloned().collect::<Vec<_>>(), vec!["y", "z"]);
        assert_eq!(b.iter().cloned().collect::<Vec<_>>(), vec!["z", "w"]);
    }

    #[test]
    fn drops_each_element_once() {
        let drops = Rc::new(Cell::new(0));

        let mut ring: FixedRing<DropCounter, 4> = FixedRing::new();
        for _ in 0..4 {
            ring.push_back(DropCounter(drops.clone())).unwrap();
        }

        // rejected element is handed back, not dropped by the ring
        let rejected = ring.push_back(DropCounter(drops.clone())).unwrap_err();
        assert_eq!(drops.get(), 0);
        drop(rejected);
        assert_eq!(drops.get(), 1);

        drop(ring.pop_front().unwrap());
        assert_eq!(drops.get(), 2);

        ring.clear();
        assert_eq!(drops.get(), 5);
        assert!(ring.is_empty());
        assert_eq!(ring.begin().slot(), 0);

        ring.push_back(DropCounter(drops.clone())).unwrap();
        drop(ring);
        assert_eq!(drops.get(), 6);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let mut ring: FixedRing<usize, 4> = FixedRing::new();
        for i in 0..4 {
            ring.push_back(i).unwrap();
        }

        let iter = ring.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn debug_lists_logical_order() {
        let mut ring: FixedRing<usize, 2> = FixedRing::new();
        ring.push_back(5).unwrap();
        ring.push_back(6).unwrap();
        ring.pop_front().unwrap();
        ring.push_back(7).unwrap();

        assert_eq!(format!("{ring:?}"), "[6, 7]");
    }
}
