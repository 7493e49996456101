use std::{mem::MaybeUninit, slice};

/// Inline storage of exactly `N + 1` slots.
///
/// `[T; N + 1]` cannot be spelled with a const parameter, so the extra slot is
/// a separate trailing field. With `repr(C)` the two fields are laid out back
/// to back with no padding, which is exactly the layout of a `N + 1` array.
#[repr(C)]
pub(crate) struct Slots<T, const N: usize> {
    body: [MaybeUninit<T>; N],
    spare: MaybeUninit<T>,
}

impl<T, const N: usize> Slots<T, N> {
    pub const LEN: usize = N + 1;

    #[inline]
    pub fn uninit() -> Self {
        Self {
            // an array of `MaybeUninit` needs no initialization
            body: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            spare: MaybeUninit::uninit(),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[MaybeUninit<T>] {
        unsafe { slice::from_raw_parts(self as *const Self as *const MaybeUninit<T>, Self::LEN) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe { slice::from_raw_parts_mut(self as *mut Self as *mut MaybeUninit<T>, Self::LEN) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn layout_matches_array() {
        assert_eq!(size_of::<Slots<u32, 3>>(), size_of::<[u32; 4]>());
        assert_eq!(size_of::<Slots<u8, 0>>(), size_of::<[u8; 1]>());
        assert_eq!(size_of::<Slots<(u64, u8), 2>>(), size_of::<[(u64, u8); 3]>());
        assert_eq!(align_of::<Slots<u64, 5>>(), align_of::<u64>());
    }

    #[test]
    fn spare_slot_is_last() {
        let mut slots: Slots<u32, 2> = Slots::uninit();
        assert_eq!(slots.as_slice().len(), 3);

        slots.as_mut_slice()[2].write(7);
        assert_eq!(unsafe { slots.spare.assume_init() }, 7);
    }
}
