use crate::predicate::Predicate;
use crate::rule::TransitionRule;
use serde::{Deserialize, Serialize};
use vanity_domain::{ChoiceValue, SlotType};

/// A candidate value for the slot of its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Choice {
    pub value: ChoiceValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Predicate::is_always")]
    pub visible: Predicate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<TransitionRule>,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<ChoiceValue>) -> Self {
        Self { value: value.into(), label: None, visible: Predicate::Always, rules: Vec::new() }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn visible_when(mut self, predicate: Predicate) -> Self {
        self.visible = predicate;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = TransitionRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Label for pickers, falling back to the value itself.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.value.to_string())
    }
}

/// Choices pooled under one shared visibility predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChoiceGroup {
    pub label: String,
    #[serde(default, skip_serializing_if = "Predicate::is_always")]
    pub visible: Predicate,
    pub choices: Vec<Choice>,
}

impl ChoiceGroup {
    #[must_use]
    pub fn new(label: impl Into<String>, visible: Predicate) -> Self {
        Self { label: label.into(), visible, choices: Vec::new() }
    }

    #[must_use]
    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices.extend(choices);
        self
    }
}

/// The choices of a section: either one flat list or predicate-gated groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Options {
    Flat(Vec<Choice>),
    Grouped(Vec<ChoiceGroup>),
}

impl Default for Options {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

/// The picker for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Section {
    pub slot: SlotType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Predicate::is_always")]
    pub visible: Predicate,
    /// Section-level rules, eligible whichever choice is active.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<TransitionRule>,
    pub options: Options,
}

impl Section {
    #[must_use]
    pub fn new(slot: SlotType, label: impl Into<String>) -> Self {
        Self {
            slot,
            label: label.into(),
            visible: Predicate::Always,
            rules: Vec::new(),
            options: Options::default(),
        }
    }

    #[must_use]
    pub fn visible_when(mut self, predicate: Predicate) -> Self {
        self.visible = predicate;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.options = Options::Flat(choices.into_iter().collect());
        self
    }

    #[must_use]
    pub fn groups(mut self, groups: impl IntoIterator<Item = ChoiceGroup>) -> Self {
        self.options = Options::Grouped(groups.into_iter().collect());
        self
    }

    /// Every choice paired with its group, in declaration order.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (Option<&ChoiceGroup>, &Choice)> + '_> {
        match &self.options {
            Options::Flat(choices) => Box::new(choices.iter().map(|choice| (None, choice))),
            Options::Grouped(groups) => Box::new(
                groups.iter().flat_map(|group| group.choices.iter().map(move |c| (Some(group), c))),
            ),
        }
    }

    /// Every choice in declaration order, regardless of visibility.
    pub fn all_choices(&self) -> impl Iterator<Item = &Choice> {
        self.entries().map(|(_, choice)| choice)
    }

    /// The choice holding `value` together with its group.
    #[must_use]
    pub fn find(&self, value: &ChoiceValue) -> Option<(Option<&ChoiceGroup>, &Choice)> {
        self.entries().find(|(_, choice)| choice.value == *value)
    }

    #[must_use]
    pub fn offers(&self, value: &ChoiceValue) -> bool {
        self.find(value).is_some()
    }

    /// Whether clearing this slot keeps an explicit `none` entry: some rule owned by the
    /// section clears it with `preserve_if_null`.
    #[must_use]
    pub fn preserves_null(&self) -> bool {
        self.owned_rules().any(|(_, rule)| rule.target.is_none() && rule.preserve_if_null)
    }

    /// Rules owned by the section, section-level first, each tagged with its owning choice.
    pub fn owned_rules(&self) -> impl Iterator<Item = (Option<&ChoiceValue>, &TransitionRule)> {
        let section = self.rules.iter().map(|rule| (None::<&ChoiceValue>, rule));
        let choices = self
            .all_choices()
            .flat_map(|choice| choice.rules.iter().map(move |rule| (Some(&choice.value), rule)));
        section.chain(choices)
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.entries().count()
    }
}
