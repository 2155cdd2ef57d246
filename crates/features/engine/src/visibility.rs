//! Pure visibility queries, evaluated fresh against the selection on every call.

use vanity_catalog::{Choice, ChoiceGroup, Section};
use vanity_domain::{ChoiceMap, ChoiceValue};

#[must_use]
pub fn is_section_visible(section: &Section, choices: &ChoiceMap) -> bool {
    section.visible.evaluate(choices)
}

/// Whether `value` is offered by `section` and its section, group and choice predicates all
/// hold.
#[must_use]
pub fn is_choice_visible(section: &Section, value: &ChoiceValue, choices: &ChoiceMap) -> bool {
    is_section_visible(section, choices)
        && section.find(value).is_some_and(|(group, choice)| entry_visible(group, choice, choices))
}

/// Currently selectable choices of `section` in declaration order; groups are pooled.
#[must_use]
pub fn visible_choices<'a>(section: &'a Section, choices: &ChoiceMap) -> Vec<&'a Choice> {
    if !is_section_visible(section, choices) {
        return Vec::new();
    }
    section
        .entries()
        .filter(|(group, choice)| entry_visible(*group, choice, choices))
        .map(|(_, choice)| choice)
        .collect()
}

/// The choice auto-selected when `section` becomes visible with an empty slot.
#[must_use]
pub fn first_visible_choice<'a>(section: &'a Section, choices: &ChoiceMap) -> Option<&'a Choice> {
    if !is_section_visible(section, choices) {
        return None;
    }
    section.entries().find(|(group, choice)| entry_visible(*group, choice, choices)).map(|(_, c)| c)
}

fn entry_visible(group: Option<&ChoiceGroup>, choice: &Choice, choices: &ChoiceMap) -> bool {
    group.is_none_or(|g| g.visible.evaluate(choices)) && choice.visible.evaluate(choices)
}
