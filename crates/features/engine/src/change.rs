use vanity_catalog::TransitionRule;
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};

/// One pending write to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub slot: SlotType,
    pub value: ChoiceValue,
    /// Whether clearing keeps an explicit `none` entry rather than removing the slot.
    pub preserve_if_null: bool,
}

impl Change {
    /// Selects `value`; a `none` value is stored as a deliberate, explicit unselection.
    #[must_use]
    pub fn set(slot: SlotType, value: impl Into<ChoiceValue>) -> Self {
        Self { slot, value: value.into(), preserve_if_null: true }
    }

    #[must_use]
    pub const fn clear(slot: SlotType, preserve_if_null: bool) -> Self {
        Self { slot, value: ChoiceValue::None, preserve_if_null }
    }

    pub(crate) fn from_rule(owner: SlotType, rule: &TransitionRule) -> Self {
        Self { slot: owner, value: rule.target.clone(), preserve_if_null: rule.preserve_if_null }
    }

    /// Writes the change; returns the value to publish when the selection actually changed.
    ///
    /// A removal publishes `none`.
    pub(crate) fn apply(&self, choices: &mut ChoiceMap) -> Option<ChoiceValue> {
        if self.value.is_none() && !self.preserve_if_null {
            return choices.remove(self.slot).map(|_| ChoiceValue::None);
        }
        match choices.set(self.slot, self.value.clone()) {
            Some(previous) if previous == self.value => None,
            _ => Some(self.value.clone()),
        }
    }
}
