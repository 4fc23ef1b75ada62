use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A non-owning reference to an arena slot.
///
/// The generation is bumped every time the slot is released, so a handle that outlives its
/// element never resolves to whatever gets allocated into the slot next.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle {
    index: NonZero<RawHandle>,
    generation: u32,
}

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawHandle;
        Self {
            index: NonZero::new(raw).unwrap(),
            generation,
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.index.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // `Option<Handle>` is how every link is stored, so it must not cost a tag.
    assert_eq_size!(Handle, Option<Handle>);

    #[test]
    #[should_panic(expected = "`Handle::new()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::new(Handle::MAX + 1, 0);
    }

    #[test]
    fn generation_distinguishes_handles() {
        assert_ne!(Handle::new(3, 0), Handle::new(3, 1));
        assert_eq!(Handle::new(3, 7), Handle::new(3, 7));
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX, generation in any::<u32>()) {
            let handle = Handle::new(index, generation);
            prop_assert_eq!(handle.to_index(), index);
            prop_assert_eq!(handle.generation(), generation);
        }
    }
}
