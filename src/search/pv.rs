//! Principal-variation hash table.
//!
//! A fixed-capacity table mapping `hash % capacity` to the best move found
//! for that position. Collisions always overwrite — no chaining — except
//! that deeper plies may not evict the root position's entry, which anchors
//! the extracted variation.

use crate::board::Move;

pub(crate) const PV_TABLE_ENTRIES: usize = 1024;

#[derive(Clone, Copy)]
struct PvSlot {
    mv: Move,
    hash: u64,
}

impl PvSlot {
    const fn vacant() -> Self {
        PvSlot {
            mv: Move::null(),
            hash: 0,
        }
    }
}

pub(crate) struct PvTable {
    slots: Box<[PvSlot; PV_TABLE_ENTRIES]>,
    /// Slot holding the root position's move for the current search;
    /// `PV_TABLE_ENTRIES` when unset.
    root_slot: usize,
}

impl PvTable {
    pub(crate) fn new() -> Self {
        PvTable {
            slots: Box::new([PvSlot::vacant(); PV_TABLE_ENTRIES]),
            root_slot: PV_TABLE_ENTRIES,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(PvSlot::vacant());
        self.root_slot = PV_TABLE_ENTRIES;
    }

    pub(crate) fn store(&mut self, mv: Move, hash: u64, search_ply: usize) {
        let index = (hash % PV_TABLE_ENTRIES as u64) as usize;

        if search_ply != 0 && index == self.root_slot {
            // A deeper position may not overwrite the root move.
            return;
        }
        if search_ply == 0 {
            self.root_slot = index;
        }

        self.slots[index] = PvSlot { mv, hash };
    }

    /// The cached move for `hash`, or the null move on a miss.
    pub(crate) fn probe(&self, hash: u64) -> Move {
        let slot = &self.slots[(hash % PV_TABLE_ENTRIES as u64) as usize];
        if slot.hash == hash {
            slot.mv
        } else {
            Move::null()
        }
    }
}
