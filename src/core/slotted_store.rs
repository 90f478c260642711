//! Slotted item store
//!
//! This module provides the `SlottedStore`, a bounded collection of uniquely-coded
//! items that can be addressed both by code and by a numbered slot.
//!
//! # Layout
//!
//! Items live in an arena (`entries`). The code index and the slot map both hold
//! arena indices, so the arena is the single source of truth and neither map can
//! point at an item the other does not know about:
//!
//! ```text
//! codes: "A1" ──┐              slots: 0 ──┐
//!               ▼                         ▼
//! entries: [ Some(A1), None, Some(B2) ]  ◄── 3 ── slots
//!                       ▲
//!                    vacant
//! ```
//!
//! # Invariants
//!
//! - every slot lies in `[0, capacity)` and refers to a live entry
//! - every live entry occupies at most one slot
//! - codes are unique
//!
//! All mutation goes through `put` and `remove`, which keep both maps in step.

use crate::types::{Stock, VendingError};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Default number of slots when none is configured
pub const DEFAULT_CAPACITY: usize = 20;

/// Outcome of a successful `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A new item was registered and bound to `slot`
    Stocked { slot: usize },

    /// The code was already known; its count is now `count`
    Restocked { count: u32 },
}

/// Dual-indexed, capacity-bounded item store
#[derive(Debug, Clone)]
pub struct SlottedStore<T> {
    /// Upper bound on occupied slots
    capacity: usize,

    /// Arena of items; `None` marks a vacant cell
    entries: Vec<Option<T>>,

    /// Vacant arena cells available for reuse
    vacant: Vec<usize>,

    /// Item code to arena index
    codes: HashMap<String, usize>,

    /// Slot to arena index, ordered so the first free slot is a single pass
    slots: BTreeMap<usize, usize>,
}

impl<T: Stock> SlottedStore<T> {
    /// Create an empty store with `capacity` slots
    ///
    /// A capacity of zero is allowed; every fresh placement then fails with
    /// `StoreFull` or `SlotOutOfRange`.
    pub fn new(capacity: usize) -> Self {
        SlottedStore {
            capacity,
            entries: Vec::new(),
            vacant: Vec::new(),
            codes: HashMap::new(),
            slots: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of registered items
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of slots currently bound to an item
    pub fn occupied_slots(&self) -> usize {
        self.slots.len()
    }

    /// Place an item, or restock it if the code is already registered
    ///
    /// # Arguments
    ///
    /// * `item` - The item to add. Its code decides between insert and restock.
    /// * `slot` - Slot to bind a new item to. `None` picks the lowest free slot.
    ///   Ignored when restocking; a restock never moves an item.
    ///
    /// # Returns
    ///
    /// * `Ok(Placement::Stocked { slot })` - New item registered in `slot`
    /// * `Ok(Placement::Restocked { count })` - Existing item's count increased
    ///
    /// # Errors
    ///
    /// The store is left untouched when:
    /// - `slot` is not below the capacity (`SlotOutOfRange`)
    /// - `slot` is already bound (`SlotOccupied`)
    /// - no slot is given and none is free (`StoreFull`)
    /// - the restocked count would overflow (`CountOverflow`)
    pub fn put(&mut self, item: T, slot: Option<usize>) -> Result<Placement, VendingError> {
        let known = self.codes.get(item.code()).copied();
        if let Some(existing) = known.and_then(|index| self.entry_mut(index)) {
            let count = existing
                .count()
                .checked_add(item.count())
                .ok_or_else(|| VendingError::count_overflow(item.code()))?;
            existing.set_count(count);
            debug!(code = item.code(), count, "Restocked item");
            return Ok(Placement::Restocked { count });
        }

        let slot = match slot {
            Some(slot) => {
                if slot >= self.capacity {
                    return Err(VendingError::slot_out_of_range(slot, self.capacity));
                }
                if let Some(&occupant) = self.slots.get(&slot) {
                    return Err(VendingError::slot_occupied(slot, self.code_at(occupant)));
                }
                slot
            }
            None => self
                .first_free_slot()
                .ok_or_else(|| VendingError::store_full(self.capacity))?,
        };

        let code = item.code().to_string();
        let index = self.allocate(item);
        debug!(code = code.as_str(), slot, "Stocked item");
        self.codes.insert(code, index);
        self.slots.insert(slot, index);

        Ok(Placement::Stocked { slot })
    }

    /// Remove an item and every slot binding that refers to it
    ///
    /// # Returns
    ///
    /// * `Some(item)` - The removed item
    /// * `None` - If the code is not registered
    pub fn remove(&mut self, code: &str) -> Option<T> {
        let index = self.codes.remove(code)?;
        self.slots.retain(|_, bound| *bound != index);
        let item = self.entries.get_mut(index).and_then(Option::take);
        self.vacant.push(index);
        debug!(code, "Removed item");
        item
    }

    /// Look up an item by code, regardless of whether it is currently valid
    pub fn get(&self, code: &str) -> Option<&T> {
        self.codes.get(code).and_then(|&index| self.entry(index))
    }

    /// Look up the item bound to `slot`
    ///
    /// Returns `None` for an empty slot and for any slot outside the capacity.
    pub fn get_at(&self, slot: usize) -> Option<&T> {
        self.slots.get(&slot).and_then(|&index| self.entry(index))
    }

    /// Every registered item whose `check()` currently holds
    ///
    /// The order is unspecified.
    pub fn list_valid(&self) -> Vec<&T> {
        self.entries
            .iter()
            .flatten()
            .filter(|item| item.check())
            .collect()
    }

    /// Slot an item is bound to
    ///
    /// `None` when the code is unknown or the item holds no slot; neither is an error.
    pub fn find(&self, code: &str) -> Option<usize> {
        let index = *self.codes.get(code)?;
        self.slots
            .iter()
            .find(|&(_, &bound)| bound == index)
            .map(|(&slot, _)| slot)
    }

    fn entry(&self, index: usize) -> Option<&T> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index).and_then(Option::as_mut)
    }

    fn code_at(&self, index: usize) -> &str {
        self.entry(index).map(Stock::code).unwrap_or_default()
    }

    /// Lowest slot not present in the slot map, if below capacity
    fn first_free_slot(&self) -> Option<usize> {
        let mut candidate = 0;
        for &taken in self.slots.keys() {
            if taken != candidate {
                break;
            }
            candidate += 1;
        }
        (candidate < self.capacity).then_some(candidate)
    }

    fn allocate(&mut self, item: T) -> usize {
        match self.vacant.pop() {
            Some(index) => {
                self.entries[index] = Some(item);
                index
            }
            None => {
                self.entries.push(Some(item));
                self.entries.len() - 1
            }
        }
    }
}

impl<T: Stock> Default for SlottedStore<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
