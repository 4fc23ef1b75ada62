use alloc::vec::Vec;

use super::handle::Handle;

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

/// Slot storage that owns every element and hands out generation-checked [`Handle`]s.
///
/// Elements never move between slots, so a handle stays valid until its element is taken.
///
/// Generations never wrap. A slot whose generation reaches `u32::MAX` is retired when its element
/// is taken: it stays empty and is never handed out again, so no old handle can match it.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
    // Empty slots left off the free list because their generations are used up.
    retired: usize,
    // Generation given to freshly pushed slots. Raised past every generation ever issued
    // whenever the arena is cleared.
    epoch: u32,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            retired: 0,
            epoch: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            retired: 0,
            epoch: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len() - self.retired
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot. `take()` already advanced its generation.
            self.slots[h.to_index()].element = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot {
                generation: self.epoch,
                element: Some(element),
            });
            Handle::new(self.slots.len() - 1, self.epoch)
        }
    }

    /// Returns `true` if `handle` refers to a live element of this arena.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.try_get(handle).is_some()
    }

    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.to_index())?;
        if slot.generation == handle.generation() {
            slot.element.as_ref()
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.try_get(handle).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match self.slots.get_mut(handle.to_index()) {
            Some(slot) if slot.generation == handle.generation() => {
                slot.element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
            }
            _ => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        assert!(slot.generation == handle.generation(), "`Arena::take()` - `handle` is invalid!");
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        if let Some(generation) = slot.generation.checked_add(1) {
            slot.generation = generation;
            self.free.push(Handle::new(handle.to_index(), generation));
        } else {
            self.retired += 1;
        }
        element
    }

    /// Mutable access to every slot, in slot order, `None` for free slots.
    ///
    /// Lets callers hold disjoint `&mut` borrows of many elements at once.
    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = Option<&mut T>> {
        self.slots.iter_mut().map(|slot| slot.element.as_mut())
    }

    pub(crate) fn clear(&mut self) {
        let highest = self.slots.iter().map(|slot| slot.generation).fold(self.epoch, u32::max);
        if let Some(epoch) = highest.checked_add(1) {
            self.epoch = epoch;
            self.slots.clear();
            self.retired = 0;
        } else {
            // No fresh generation is left for these indices, so retire all of them. Slots pushed
            // later sit at indices whose old handles all predate the previous epoch.
            self.epoch = u32::MAX;
            for slot in &mut self.slots {
                slot.generation = u32::MAX;
                slot.element = None;
            }
            self.retired = self.slots.len();
        }
        self.free.clear();
    }
}
