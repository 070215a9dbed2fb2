//! Assignment of item icons to detected slots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::compose::types::PlacedItem;

/// Which item sits in which slot. Slot indices refer to the detector's
/// reading-order output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    slot_count: usize,
    items: BTreeMap<usize, PlacedItem>,
}

impl Arrangement {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            items: BTreeMap::new(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.slot_count {
            return Err(SlotError::SlotOutOfRange {
                index,
                slot_count: self.slot_count,
            });
        }
        Ok(())
    }

    /// Puts `item` into `slot`, returning whatever was there before.
    pub fn assign(&mut self, slot: usize, item: PlacedItem) -> Result<Option<PlacedItem>> {
        self.check(slot)?;
        Ok(self.items.insert(slot, item))
    }

    /// Moves the item in `from` to `to`, swapping with any item already in `to`.
    ///
    /// Moving out of an empty slot does nothing.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.check(from)?;
        self.check(to)?;

        if from == to {
            return Ok(());
        }

        if let Some(moving) = self.items.remove(&from) {
            if let Some(displaced) = self.items.insert(to, moving) {
                self.items.insert(from, displaced);
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, slot: usize) -> Result<Option<PlacedItem>> {
        self.check(slot)?;
        Ok(self.items.remove(&slot))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, slot: usize) -> Option<&PlacedItem> {
        self.items.get(&slot)
    }

    /// Occupied slots in ascending slot order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &PlacedItem)> {
        self.items.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
