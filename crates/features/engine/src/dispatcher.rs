use crate::change::Change;
use vanity_catalog::{RuleIndex, Subscription};
use tracing::trace;
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};

/// Routes "slot changed" events to the transition rules subscribed to that slot.
///
/// Borrows the catalog's rule index; there is no global registry.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    rules: &'a RuleIndex,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub const fn new(rules: &'a RuleIndex) -> Self {
        Self { rules }
    }

    /// Changes requested by rules fired for `slot` taking `value`, in declaration order.
    ///
    /// A rule fires when its value pattern accepts `value`, its guard holds for `choices` and,
    /// for choice-level rules, its owning choice is the current selection of its own slot.
    pub fn publish<'b>(
        &'b self,
        slot: SlotType,
        value: &'b ChoiceValue,
        choices: &'b ChoiceMap,
    ) -> impl Iterator<Item = Change> + 'b {
        self.rules
            .subscribers(slot)
            .iter()
            .filter(move |sub| {
                sub.rule.accepts(value) && sub.rule.allowed(choices) && is_active(sub, choices)
            })
            .map(move |sub| {
                trace!(trigger = %slot, value = %value, owner = %sub.owner, target = %sub.rule.target, "Rule fired");
                Change::from_rule(sub.owner, &sub.rule)
            })
    }
}

fn is_active(sub: &Subscription, choices: &ChoiceMap) -> bool {
    sub.choice.as_ref().is_none_or(|owner| choices.get(sub.owner) == Some(owner))
}
