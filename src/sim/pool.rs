//! Slot arena with a free list
//!
//! Projectiles and asteroids live in fixed slots that are recycled instead of
//! reallocated. Spawning pops a free slot (or grows the arena when none is
//! free); releasing marks the slot inactive and pushes it back. The arena
//! never shrinks except on [`Pool::clear`].

/// One storage slot
#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    active: bool,
}

/// Free-list backed arena of recyclable entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `item`, reusing a free slot when one exists. Returns the slot index.
    pub fn spawn(&mut self, item: T) -> usize {
        match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.item = item;
                slot.active = true;
                idx
            }
            None => {
                self.slots.push(Slot { item, active: true });
                self.slots.len() - 1
            }
        }
    }

    /// Deactivate a slot. Returns false if it was already free or out of range.
    pub fn release(&mut self, idx: usize) -> bool {
        match self.slots.get_mut(idx) {
            Some(slot) if slot.active => {
                slot.active = false;
                self.free.push(idx);
                true
            }
            _ => false,
        }
    }

    /// Index of the slot the next [`Pool::spawn`] will overwrite, if any
    pub fn next_free(&self) -> Option<usize> {
        self.free.last().copied()
    }

    /// Item stored in a free slot, kept until the slot is reused
    pub fn stale(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).filter(|s| !s.active).map(|s| &s.item)
    }

    pub fn is_active(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|s| s.active)
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).filter(|s| s.active).map(|s| &s.item)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots
            .get_mut(idx)
            .filter(|s| s.active)
            .map(|s| &mut s.item)
    }

    /// Borrow two distinct active slots mutably
    pub fn get_pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut T, &mut T)> {
        if a == b || !self.is_active(a) || !self.is_active(b) {
            return None;
        }
        let (lo, hi, swapped) = if a < b { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = &mut head[lo].item;
        let second = &mut tail[0].item;
        Some(if swapped { (second, first) } else { (first, second) })
    }

    /// Active entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &s.item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &mut s.item))
    }

    /// Number of active entries
    pub fn active_len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total slots allocated (active + free)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_len() == 0
    }

    /// Drop every slot, active or free
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
