use crate::error::{CatalogError, CatalogErrorExt};
use crate::rule::{RuleIndex, Subscription};
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};
use vanity_domain::{ChoiceMap, SlotType};

/// The closed, ordered set of sections driving one product.
///
/// Built once, validated, then shared read-only. The rule index is derived at construction and
/// is never serialized.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
    defaults: ChoiceMap,
    index: RuleIndex,
}

#[derive(Serialize)]
struct CatalogRef<'a> {
    sections: &'a [Section],
    defaults: &'a ChoiceMap,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogSource {
    sections: Vec<Section>,
    #[serde(default)]
    defaults: ChoiceMap,
}

impl Catalog {
    /// Validates `sections` and `defaults` and builds the rule index.
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidCatalog`] when:
    /// * two sections share a slot, or a section offers no choice;
    /// * a section repeats a choice value;
    /// * a rule targets a value its own section does not offer, or triggers on its own slot;
    /// * a default names a slot without a section or a value the section does not offer.
    pub fn new(sections: Vec<Section>, defaults: ChoiceMap) -> Result<Self, CatalogError> {
        validate(&sections, &defaults)?;

        let mut index = RuleIndex::default();
        for (position, section) in sections.iter().enumerate() {
            for (choice, rule) in section.owned_rules() {
                index.push(Subscription {
                    owner: section.slot,
                    section: position,
                    choice: choice.cloned(),
                    rule: rule.clone(),
                });
            }
        }

        let catalog = Self { sections, defaults, index };
        let cycles = catalog.rule_cycles();
        if !cycles.is_empty() {
            warn!(?cycles, "Catalog rules can trigger each other in a loop");
        }
        debug!(sections = catalog.sections.len(), rules = catalog.index.len(), "Catalog indexed");

        Ok(catalog)
    }

    /// Sections in declaration order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, slot: SlotType) -> Option<&Section> {
        self.sections.iter().find(|section| section.slot == slot)
    }

    /// Declaration position of the section owning `slot`.
    #[must_use]
    pub fn position(&self, slot: SlotType) -> Option<usize> {
        self.sections.iter().position(|section| section.slot == slot)
    }

    /// Starting selection of a new session, before settling.
    #[must_use]
    pub const fn defaults(&self) -> &ChoiceMap {
        &self.defaults
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleIndex {
        &self.index
    }

    /// Groups of slots whose rules can retrigger each other.
    ///
    /// Each group is a strongly connected set in the `trigger -> owner` graph (a single slot
    /// only when it reaches itself), sorted by slot order.
    #[must_use]
    pub fn rule_cycles(&self) -> Vec<Vec<SlotType>> {
        let edges = self.index.edges();
        let slots = SlotType::ALL;
        let n = slots.len();
        let at = |slot: SlotType| slots.iter().position(|s| *s == slot).unwrap_or(0);

        let mut reach = vec![vec![false; n]; n];
        for (trigger, owner) in edges {
            reach[at(trigger)][at(owner)] = true;
        }
        for k in 0..n {
            for i in 0..n {
                if reach[i][k] {
                    for j in 0..n {
                        if reach[k][j] {
                            reach[i][j] = true;
                        }
                    }
                }
            }
        }

        let mut seen = BTreeSet::new();
        let mut cycles = Vec::new();
        for i in 0..n {
            if seen.contains(&i) || !reach[i][i] {
                continue;
            }
            let group: Vec<usize> = (0..n).filter(|&j| reach[i][j] && reach[j][i]).collect();
            seen.extend(group.iter().copied());
            cycles.push(group.into_iter().map(|j| slots[j]).collect());
        }
        cycles
    }

    /// Serializes sections and defaults as pretty JSON.
    ///
    /// # Errors
    /// Returns [`CatalogError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&CatalogRef { sections: &self.sections, defaults: &self.defaults })
            .context("Failed to serialize catalog")
    }

    /// Parses and validates a JSON catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::Serialize`] for malformed JSON and
    /// [`CatalogError::InvalidCatalog`] when validation fails.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let source: CatalogSource = serde_json::from_str(json).context("Failed to parse catalog")?;
        Self::new(source.sections, source.defaults)
    }

    /// Reads a JSON catalog from disk.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).context("Failed to read catalog file")?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), sections = catalog.sections.len(), "Catalog loaded");
        Ok(catalog)
    }
}

fn validate(sections: &[Section], defaults: &ChoiceMap) -> Result<(), CatalogError> {
    if sections.is_empty() {
        return Err(CatalogError::invalid("catalog declares no sections"));
    }

    let mut slots = BTreeSet::new();
    for section in sections {
        if !slots.insert(section.slot) {
            return Err(CatalogError::invalid(format!("duplicate section for slot '{}'", section.slot)));
        }
        if section.choice_count() == 0 {
            return Err(CatalogError::invalid(format!("section '{}' offers no choices", section.slot)));
        }

        let mut values = BTreeSet::new();
        for choice in section.all_choices() {
            if !values.insert(&choice.value) {
                return Err(CatalogError::invalid(format!(
                    "section '{}' repeats choice '{}'",
                    section.slot, choice.value
                )));
            }
        }

        for (_, rule) in section.owned_rules() {
            if rule.trigger == section.slot {
                return Err(CatalogError::invalid(format!(
                    "rule of section '{}' triggers on its own slot",
                    section.slot
                )));
            }
            if !rule.target.is_none() && !section.offers(&rule.target) {
                return Err(CatalogError::invalid(format!(
                    "rule of section '{}' targets unknown choice '{}'",
                    section.slot, rule.target
                )));
            }
        }
    }

    for (slot, value) in defaults.iter() {
        let Some(section) = sections.iter().find(|s| s.slot == slot) else {
            return Err(CatalogError::invalid(format!("default for slot '{slot}' has no section")));
        };
        if !value.is_none() && !section.offers(value) {
            return Err(CatalogError::invalid(format!(
                "default '{value}' is not a choice of section '{slot}'"
            )));
        }
    }

    Ok(())
}
