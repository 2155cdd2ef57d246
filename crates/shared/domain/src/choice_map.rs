//! The selection state of one configuration session.

use crate::slot::SlotType;
use crate::value::ChoiceValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Partial mapping from slot to selected value; at most one value per slot.
///
/// Backed by an ordered map keyed by [`SlotType`], so iteration and serialization follow
/// slot declaration order rather than insertion order.
///
/// Three states are distinguishable for a slot:
/// * absent: nothing chosen yet, eligible for auto-selection;
/// * [`ChoiceValue::None`]: deliberately unselected, left alone by auto-selection;
/// * any other value: selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceMap {
    entries: BTreeMap<SlotType, ChoiceValue>,
}

impl ChoiceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, slot: SlotType) -> Option<&ChoiceValue> {
        self.entries.get(&slot)
    }

    /// The selected value, treating the `none` sentinel as empty.
    #[must_use]
    pub fn selected(&self, slot: SlotType) -> Option<&ChoiceValue> {
        self.entries.get(&slot).filter(|value| !value.is_none())
    }

    #[must_use]
    pub fn number(&self, slot: SlotType) -> Option<i64> {
        self.entries.get(&slot).and_then(ChoiceValue::as_number)
    }

    #[must_use]
    pub fn text(&self, slot: SlotType) -> Option<&str> {
        self.entries.get(&slot).and_then(ChoiceValue::as_text)
    }

    #[must_use]
    pub fn contains(&self, slot: SlotType) -> bool {
        self.entries.contains_key(&slot)
    }

    /// Sets `slot`, returning the previous value.
    pub fn set(&mut self, slot: SlotType, value: ChoiceValue) -> Option<ChoiceValue> {
        self.entries.insert(slot, value)
    }

    /// Removes `slot` entirely, returning the previous value.
    pub fn remove(&mut self, slot: SlotType) -> Option<ChoiceValue> {
        self.entries.remove(&slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotType, &ChoiceValue)> {
        self.entries.iter().map(|(slot, value)| (*slot, value))
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotType> + '_ {
        self.entries.keys().copied()
    }
}

impl FromIterator<(SlotType, ChoiceValue)> for ChoiceMap {
    fn from_iter<I: IntoIterator<Item = (SlotType, ChoiceValue)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl IntoIterator for ChoiceMap {
    type Item = (SlotType, ChoiceValue);
    type IntoIter = btree_map::IntoIter<SlotType, ChoiceValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChoiceMap {
    type Item = (&'a SlotType, &'a ChoiceValue);
    type IntoIter = btree_map::Iter<'a, SlotType, ChoiceValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
