//! Generational slot arena.
//!
//! Owns values in a `Vec` of slots and hands out [`SlotId`] handles that pair
//! a slot index with the slot's generation. Freed slots are recycled through a
//! free list; every free bumps the slot generation, so a handle to a removed
//! value never resolves to whatever later reuses the slot.
//!
//! `clear()` drops every slot at once and raises the arena-wide generation
//! floor above any generation handed out so far, which keeps handles issued
//! before the clear from resolving afterwards.
//!
//! Every arena also draws a process-unique id at construction and stamps it
//! into its handles, so a handle issued by one arena never resolves in
//! another.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    arena: u64,
    index: usize,
    generation: u64,
}

impl SlotId {
    pub(crate) fn new(arena: u64, index: usize, generation: u64) -> Self {
        Self {
            arena,
            index,
            generation,
        }
    }

    /// Id of the arena that issued this handle.
    pub fn arena(self) -> u64 {
        self.arena
    }

    /// Slot index inside the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    id: u64,
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
    // Lowest generation a freshly created slot may start at.
    floor: u64,
    // Highest generation ever stamped on a slot.
    high_water: u64,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            floor: 0,
            high_water: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.value = Some(value);
            SlotId::new(self.id, idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: self.floor,
                value: Some(value),
            });
            SlotId::new(self.id, self.slots.len() - 1, self.floor)
        };
        self.len += 1;
        id
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if id.arena != self.id {
            return None;
        }
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation += 1;
        self.high_water = self.high_water.max(slot.generation);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
        self.floor = self.high_water.max(self.floor) + 1;
        self.high_water = self.floor;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        let arena = self.id;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (SlotId::new(arena, idx, slot.generation), value))
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
