//! Visibility predicates as tagged data.
//!
//! Predicates are plain serializable expressions over a [`ChoiceMap`], so a catalog can be
//! stored as JSON, evaluated in isolation and inspected for the slots it depends on.

use serde::{Deserialize, Serialize};
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};

/// How a transition rule or predicate tests a slot value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueMatch {
    /// The value equals this one.
    Exact(ChoiceValue),
    /// The stringified value contains this pattern, e.g. `"GLASS"` matches every glass
    /// insert across all widths.
    Family(String),
}

impl ValueMatch {
    #[must_use]
    pub fn exact(value: impl Into<ChoiceValue>) -> Self {
        Self::Exact(value.into())
    }

    #[must_use]
    pub fn family(pattern: impl Into<String>) -> Self {
        Self::Family(pattern.into())
    }

    #[must_use]
    pub fn matches(&self, value: &ChoiceValue) -> bool {
        match self {
            Self::Exact(expected) => expected == value,
            Self::Family(pattern) => match value {
                ChoiceValue::Text(text) => text.contains(pattern.as_str()),
                other => other.to_string().contains(pattern.as_str()),
            },
        }
    }
}

/// A boolean expression over the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Predicate {
    #[default]
    Always,
    Equals {
        slot: SlotType,
        value: ChoiceValue,
    },
    OneOf {
        slot: SlotType,
        values: Vec<ChoiceValue>,
    },
    Matches {
        slot: SlotType,
        pattern: ValueMatch,
    },
    /// The slot holds a value other than `none`.
    IsSet {
        slot: SlotType,
    },
    Not {
        predicate: Box<Self>,
    },
    All {
        predicates: Vec<Self>,
    },
    Any {
        predicates: Vec<Self>,
    },
}

impl Predicate {
    #[must_use]
    pub fn equals(slot: SlotType, value: impl Into<ChoiceValue>) -> Self {
        Self::Equals { slot, value: value.into() }
    }

    #[must_use]
    pub fn one_of<V: Into<ChoiceValue>>(slot: SlotType, values: impl IntoIterator<Item = V>) -> Self {
        Self::OneOf { slot, values: values.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub const fn matches(slot: SlotType, pattern: ValueMatch) -> Self {
        Self::Matches { slot, pattern }
    }

    #[must_use]
    pub const fn is_set(slot: SlotType) -> Self {
        Self::IsSet { slot }
    }

    #[must_use]
    pub fn negate(predicate: Self) -> Self {
        Self::Not { predicate: Box::new(predicate) }
    }

    #[must_use]
    pub fn all(predicates: impl IntoIterator<Item = Self>) -> Self {
        Self::All { predicates: predicates.into_iter().collect() }
    }

    #[must_use]
    pub fn any(predicates: impl IntoIterator<Item = Self>) -> Self {
        Self::Any { predicates: predicates.into_iter().collect() }
    }

    #[must_use]
    pub const fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Evaluates the predicate. Total: absent slots simply fail value tests.
    #[must_use]
    pub fn evaluate(&self, choices: &ChoiceMap) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { slot, value } => choices.get(*slot) == Some(value),
            Self::OneOf { slot, values } => choices.get(*slot).is_some_and(|v| values.contains(v)),
            Self::Matches { slot, pattern } => choices.get(*slot).is_some_and(|v| pattern.matches(v)),
            Self::IsSet { slot } => choices.selected(*slot).is_some(),
            Self::Not { predicate } => !predicate.evaluate(choices),
            Self::All { predicates } => predicates.iter().all(|p| p.evaluate(choices)),
            Self::Any { predicates } => predicates.iter().any(|p| p.evaluate(choices)),
        }
    }

    /// Slots this predicate reads, in first-mention order without duplicates.
    #[must_use]
    pub fn dependencies(&self) -> Vec<SlotType> {
        let mut out = Vec::new();
        self.collect_dependencies(&mut out);
        out
    }

    fn collect_dependencies(&self, out: &mut Vec<SlotType>) {
        match self {
            Self::Always => {},
            Self::Equals { slot, .. }
            | Self::OneOf { slot, .. }
            | Self::Matches { slot, .. }
            | Self::IsSet { slot } => {
                if !out.contains(slot) {
                    out.push(*slot);
                }
            },
            Self::Not { predicate } => predicate.collect_dependencies(out),
            Self::All { predicates } | Self::Any { predicates } => {
                for predicate in predicates {
                    predicate.collect_dependencies(out);
                }
            },
        }
    }
}
