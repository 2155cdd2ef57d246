//! Transition rules and the per-catalog subscription index.

use crate::predicate::{Predicate, ValueMatch};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};

/// A reaction that sets its owning slot when another slot changes.
///
/// Attached to a section it is always eligible; attached to a choice it only fires while that
/// choice is the active selection of its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRule {
    pub trigger: SlotType,
    /// Absent means any change of `trigger` fires the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<ValueMatch>,
    pub target: ChoiceValue,
    /// Must hold on the selection at the time the trigger changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Predicate>,
    /// Clearing keeps an explicit `none` entry instead of removing the slot.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub preserve_if_null: bool,
}

impl TransitionRule {
    /// Starts a rule fired by changes of `trigger`; the target defaults to `none`.
    #[must_use]
    pub const fn on(trigger: SlotType) -> Self {
        Self { trigger, when: None, target: ChoiceValue::None, guard: None, preserve_if_null: false }
    }

    #[must_use]
    pub fn when(mut self, pattern: ValueMatch) -> Self {
        self.when = Some(pattern);
        self
    }

    #[must_use]
    pub fn set(mut self, target: impl Into<ChoiceValue>) -> Self {
        self.target = target.into();
        self
    }

    #[must_use]
    pub fn only_if(mut self, guard: Predicate) -> Self {
        self.guard = Some(guard);
        self
    }

    #[must_use]
    pub const fn preserve_if_null(mut self) -> Self {
        self.preserve_if_null = true;
        self
    }

    /// Whether a change of the trigger slot to `value` fires this rule.
    #[must_use]
    pub fn accepts(&self, value: &ChoiceValue) -> bool {
        self.when.as_ref().is_none_or(|pattern| pattern.matches(value))
    }

    /// Whether the guard, if any, holds for `choices`.
    #[must_use]
    pub fn allowed(&self, choices: &ChoiceMap) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard.evaluate(choices))
    }
}

/// A rule registered against its trigger slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Slot the rule writes to.
    pub owner: SlotType,
    /// Position of the owning section in the catalog.
    pub section: usize,
    /// Owning choice for choice-level rules.
    pub choice: Option<ChoiceValue>,
    pub rule: TransitionRule,
}

/// Trigger slot to subscriptions, each list in catalog declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    subscriptions: FxHashMap<SlotType, Vec<Subscription>>,
}

impl RuleIndex {
    pub(crate) fn push(&mut self, subscription: Subscription) {
        self.subscriptions.entry(subscription.rule.trigger).or_default().push(subscription);
    }

    /// Subscriptions fired by changes of `trigger`.
    #[must_use]
    pub fn subscribers(&self, trigger: SlotType) -> &[Subscription] {
        self.subscriptions.get(&trigger).map_or(&[], Vec::as_slice)
    }

    /// Total number of indexed rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.values().map(Vec::len).sum()
    }

    /// `(trigger, owner)` edges of the rule graph, deduplicated and sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(SlotType, SlotType)> {
        let mut edges: Vec<_> = self
            .subscriptions
            .iter()
            .flat_map(|(trigger, subs)| subs.iter().map(move |sub| (*trigger, sub.owner)))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}
