use std::{
    fmt::{self, Debug},
    mem::{self, MaybeUninit},
    ptr,
};

use tracing::{debug, trace, warn};

use crate::{
    cursor::Cursor,
    error::{CursorError, RingError},
    iter::{IntoIter, Iter, IterMut},
    offsets::{wrap_forward, RingOffsets},
    queue::RingQueue,
};

/// Heap-backed ring queue that doubles its capacity whenever a push finds it
/// full.
///
/// Storage is either absent (a default, cleared or taken ring) or exactly
/// `capacity + 1` slots long. Growth relocates every element, which bumps the
/// ring's generation and turns every previously issued [`Cursor`] stale.
pub struct GrowableRing<T>
where
    T: Debug,
{
    offsets: RingOffsets,
    slots: Box<[MaybeUninit<T>]>,
    capacity: usize,
    generation: u64,
}

impl<T> GrowableRing<T>
where
    T: Debug,
{
    pub fn new(capacity: usize) -> Self {
        assert!(capacity.ge(&1));

        Self {
            offsets: RingOffsets::default(),
            slots: Self::allocate(capacity + 1),
            capacity,
            generation: 0,
        }
    }

    fn allocate(slots: usize) -> Box<[MaybeUninit<T>]> {
        std::iter::repeat_with(MaybeUninit::uninit)
            .take(slots)
            .collect()
    }

    #[inline]
    pub const fn reserved(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.offsets.len(self.slots.len())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.size() == self.capacity
    }

    /// Bumped every time the storage is relocated or released.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn element(&self, index: usize) -> &T {
        unsafe { self.slots[index].assume_init_ref() }
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> &mut T {
        unsafe { self.slots[index].assume_init_mut() }
    }

    #[inline]
    fn debug_check_invariants(&self) {
        if self.slots.is_empty() {
            debug_assert!(self.offsets.head() == 0 && self.offsets.tail() == 0);
        } else {
            debug_assert_eq!(self.slots.len(), self.capacity + 1);
            debug_assert!(self.offsets.head() < self.slots.len());
            debug_assert!(self.offsets.tail() < self.slots.len());
        }
        debug_assert!(self.size() <= self.capacity);
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity;
        let new_capacity = if old_capacity == 0 {
            1
        } else {
            old_capacity.checked_mul(2).expect("capacity overflow")
        };

        let len = self.size();
        let mut new_slots = Self::allocate(new_capacity + 1);
        let old_slots = mem::take(&mut self.slots);

        let head = self.offsets.head();
        let tail = self.offsets.tail();

        // elements are moved bitwise and the old boxed slice never drops them
        unsafe {
            let read_ptr = old_slots.as_ptr();
            let write_ptr = new_slots.as_mut_ptr();

            if head <= tail {
                ptr::copy_nonoverlapping(read_ptr.add(head), write_ptr, len);
            } else {
                let head_run = old_slots.len() - head;
                ptr::copy_nonoverlapping(read_ptr.add(head), write_ptr, head_run);
                ptr::copy_nonoverlapping(read_ptr, write_ptr.add(head_run), tail);
            }
        }

        self.slots = new_slots;
        self.offsets = RingOffsets::new(0, len);
        self.capacity = new_capacity;
        self.generation = self.generation.wrapping_add(1);

        debug!(old_capacity, new_capacity, len, "grew ring");
        self.debug_check_invariants();
    }

    pub fn push_back(&mut self, elem: T) {
        if self.is_full() {
            self.grow();
        } else if self.slots.is_empty() {
            // released by `clear`, capacity is kept
            self.slots = Self::allocate(self.capacity + 1);
        }

        let index = self.offsets.tail();
        self.slots[index].write(elem);
        self.offsets.tail_forward(self.slots.len());

        self.debug_check_invariants();
    }

    pub fn pop_front(&mut self) -> Result<T, RingError<T>> {
        if self.is_empty() {
            warn!(capacity = self.capacity, "growable ring is empty, rejecting pop_front");
            return Err(RingError::EmptyUnderflowError);
        }

        let index = self.offsets.head();
        self.offsets.head_forward(self.slots.len());
        let elem = unsafe { self.slots[index].assume_init_read() };

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

        Some(self.element(self.offsets.back_slot(self.slots.len())))
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }

        let index = self.offsets.back_slot(self.slots.len());
        Some(self.element_mut(index))
    }

    fn drop_elements(&mut self) {
        let slots = self.slots.len();
        let mut index = self.offsets.head();
        let tail = self.offsets.tail();

        // indices go first so a panicking destructor leaks instead of double dropping
        self.offsets.reset();

        while index != tail {
            unsafe { self.slots[index].assume_init_drop() };
            index = wrap_forward(index, slots);
        }
    }

    /// Drops every element and releases the storage. The logical capacity is
    /// kept and storage is allocated again on the next push.
    pub fn clear(&mut self) {
        self.drop_elements();
        self.slots = Box::default();
        self.generation = self.generation.wrapping_add(1);

        trace!(capacity = self.capacity, "cleared growable ring");
        self.debug_check_invariants();
    }

    /// Moves the storage out into a new ring in O(1).
    ///
    /// `self` is left empty, without storage and with a capacity of 0; it
    /// stays fully usable and grows again on the next push.
    pub fn take(&mut self) -> Self {
        let moved_from = Self {
            offsets: RingOffsets::default(),
            slots: Box::default(),
            capacity: 0,
            generation: self.generation.wrapping_add(1),
        };

        let taken = mem::replace(self, moved_from);
        debug!(capacity = taken.capacity, len = taken.size(), "moved ring storage");

        self.debug_check_invariants();
        taken
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, &self.offsets)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let offsets = self.offsets;
        IterMut::new(&mut self.slots, &offsets)
    }

    /// Cursor at the head. Equal to [`end`](Self::end) when empty.
    #[inline]
    pub const fn begin(&self) -> Cursor {
        Cursor::new(self.offsets.head(), self.generation)
    }

    /// Cursor at the tail, one past the last element.
    #[inline]
    pub const fn end(&self) -> Cursor {
        Cursor::new(self.offsets.tail(), self.generation)
    }

    pub fn next_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        cursor.forward(self.generation, self.slots.len())
    }

    pub fn prev_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        cursor.backward(self.generation, self.slots.len())
    }

    pub fn get(&self, cursor: Cursor) -> Result<&T, CursorError> {
        let index = cursor.live_slot(self.generation, &self.offsets, self.slots.len())?;
        Ok(self.element(index))
    }
}

impl<T> Default for GrowableRing<T>
where
    T: Debug,
{
    fn default() -> Self {
        Self {
            offsets: RingOffsets::default(),
            slots: Box::default(),
            capacity: 0,
            generation: 0,
        }
    }
}

impl<T> Drop for GrowableRing<T>
where
    T: Debug,
{
    fn drop(&mut self) {
        self.drop_elements();
    }
}

impl<T> Clone for GrowableRing<T>
where
    T: Clone + Debug,
{
    fn clone(&self) -> Self {
        let head = self.offsets.head();
        let slots = self.slots.len();

        // same physical layout as the source, so its cursors stay meaningful
        let mut cloned = Self {
            offsets: RingOffsets::new(head, head),
            slots: Self::allocate(slots),
            capacity: self.capacity,
            generation: self.generation,
        };

        for elem in self.iter() {
            let index = cloned.offsets.tail();
            cloned.slots[index].write(elem.clone());
            cloned.offsets.tail_forward(slots);
        }

        cloned.debug_check_invariants();
        cloned
    }
}

impl<T> Debug for GrowableRing<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for GrowableRing<T>
where
    T: Debug + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for GrowableRing<T> where T: Debug + Eq {}

impl<T> Extend<T> for GrowableRing<T>
where
    T: Debug,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<T> FromIterator<T> for GrowableRing<T>
where
    T: Debug,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        let mut ring = Self::new(lower.max(1));
        ring.extend(iter);

        ring
    }
}

impl<'a, T> IntoIterator for &'a GrowableRing<T>
where
    T: Debug,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableRing<T>
where
    T: Debug,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for GrowableRing<T>
where
    T: Debug,
{
    type Item = T;
    type IntoIter = IntoIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T> RingQueue for GrowableRing<T>
where
    T: Debug,
{
    type Elem = T;

    fn push_back(&mut self, elem: T) -> Result<(), RingError<T>> {
        GrowableRing::push_back(self, elem);
        Ok(())
    }

    fn pop_front(&mut self) -> Result<T, RingError<T>> {
        GrowableRing::pop_front(self)
    }

    fn is_empty(&self) -> bool {
        GrowableRing::is_empty(self)
    }

    fn size(&self) -> usize {
        GrowableRing::size(self)
    }

    fn reserved(&self) -> usize {
        GrowableRing::reserved(self)
    }

    fn clear(&mut self) {
        GrowableRing::clear(self)
    }

    fn front(&self) -> Option<&T> {
        GrowableRing::front(self)
    }

    fn back(&self) -> Option<&T> {
        GrowableRing::back(self)
    }

    fn iter(&self) -> Iter<'_, T> {
        GrowableRing::iter(self)
    }

    fn begin(&self) -> Cursor {
        GrowableRing::begin(self)
    }

    fn end(&self) -> Cursor {
        GrowableRing::end(self)
    }

    fn next_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        GrowableRing::next_cursor(self, cursor)
    }

    fn prev_cursor(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        GrowableRing::prev_cursor(self, cursor)
    }

    fn get(&self, cursor: Cursor) -> Result<&T, CursorError> {
        GrowableRing::get(self, cursor)
    }

    fn is_full(&self) -> bool {
        GrowableRing::is_full(self)
    }
}
