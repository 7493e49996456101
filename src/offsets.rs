/// Head/tail bookkeeping for a ring addressed modulo its physical slot count.
///
/// The physical slot count is always one more than the logical capacity: the
/// slot right behind `head` is never live once the ring is full, so
/// `head == tail` only ever means empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RingOffsets {
    head: usize,
    tail: usize,
}

#[inline(always)]
pub(crate) const fn wrap_forward(slot: usize, slots: usize) -> usize {
    if slot + 1 >= slots {
        0
    } else {
        slot + 1
    }
}

#[inline(always)]
pub(crate) const fn wrap_backward(slot: usize, slots: usize) -> usize {
    if slot == 0 {
        slots.saturating_sub(1)
    } else {
        slot - 1
    }
}

impl RingOffsets {
    pub const fn new(head: usize, tail: usize) -> Self {
        Self { head, tail }
    }

    #[inline(always)]
    pub const fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    #[inline(always)]
    pub const fn len(&self, slots: usize) -> usize {
        if self.tail >= self.head {
            self.tail - self.head
        } else {
            self.tail + slots - self.head
        }
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// A ring with no slots at all counts as full.
    #[inline(always)]
    pub const fn is_full(&self, slots: usize) -> bool {
        self.len(slots) + 1 >= slots
    }

    #[inline(always)]
    pub fn head_forward(&mut self, slots: usize) {
        self.head = wrap_forward(self.head, slots);
    }

    #[inline(always)]
    pub fn tail_forward(&mut self, slots: usize) {
        self.tail = wrap_forward(self.tail, slots);
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Physical slot of the last live element. Only meaningful when non-empty.
    #[inline(always)]
    pub const fn back_slot(&self, slots: usize) -> usize {
        wrap_backward(self.tail, slots)
    }

    pub const fn contains_slot(&self, slot: usize, slots: usize) -> bool {
        if slot >= slots {
            false
        } else if self.head <= self.tail {
            // standard case
            slot >= self.head && slot < self.tail
        } else {
            // wrapping case
            slot >= self.head || slot < self.tail
        }
    }
}
