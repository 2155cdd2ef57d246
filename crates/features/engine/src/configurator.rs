use crate::change::Change;
use crate::error::EngineError;
use crate::resolver::{Resolution, Resolver};
use crate::visibility::{is_choice_visible, is_section_visible, visible_choices};
use std::sync::Arc;
use tracing::{debug, info, warn};
use vanity_catalog::{Catalog, Choice, Section};
use vanity_domain::config::EngineConfig;
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};
use vanity_session::SessionDocument;

/// One configuration session: a catalog, the engine limits, and the settled selection.
///
/// The selection only ever holds settled states. Requests run a full resolution pass on a copy
/// and commit it on success, so a rejected or aborted request leaves it untouched.
#[derive(Debug, Clone)]
pub struct Configurator {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    choices: ChoiceMap,
}

/// Outcome of restoring a persisted session.
#[derive(Debug)]
pub struct Restored {
    pub configurator: Configurator,
    /// The decoded document, when decoding succeeded.
    pub document: Option<SessionDocument>,
    /// Why the catalog defaults were used instead of the stored selection.
    pub fallback: Option<EngineError>,
}

impl Configurator {
    /// Starts a session from the catalog defaults.
    ///
    /// # Errors
    /// Returns [`EngineError::CycleDetected`] if the defaults do not settle.
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Result<Self, EngineError> {
        let defaults = catalog.defaults().clone();
        Self::settled(catalog, config, &defaults)
    }

    /// Starts a session from a stored selection.
    ///
    /// Entries the catalog does not offer are dropped before settling.
    ///
    /// # Errors
    /// Returns [`EngineError::CycleDetected`] if the selection does not settle.
    pub fn with_choices(
        catalog: Arc<Catalog>,
        config: EngineConfig,
        choices: ChoiceMap,
    ) -> Result<Self, EngineError> {
        let known = choices
            .into_iter()
            .filter(|(slot, value)| {
                let offered = catalog
                    .section(*slot)
                    .is_some_and(|s| s.offers(value) || (value.is_none() && s.preserves_null()));
                if !offered {
                    warn!(slot = %slot, value = %value, "Dropping stored value unknown to the catalog");
                }
                offered
            })
            .collect();
        Self::settled(catalog, config, &known)
    }

    /// Restores a session from an encoded [`SessionDocument`].
    ///
    /// A document that fails to decode or to settle falls back to the catalog defaults; the
    /// reason is reported in [`Restored::fallback`].
    ///
    /// # Errors
    /// Returns an error only if the catalog defaults themselves do not settle.
    pub fn rehydrate(
        catalog: Arc<Catalog>,
        config: EngineConfig,
        bytes: &[u8],
    ) -> Result<Restored, EngineError> {
        let document = match SessionDocument::decode(bytes) {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "Session unreadable, starting from defaults");
                return Ok(Restored {
                    configurator: Self::new(catalog, config)?,
                    document: None,
                    fallback: Some(err.into()),
                });
            },
        };

        match Self::with_choices(Arc::clone(&catalog), config, document.choices.clone()) {
            Ok(configurator) => {
                info!(id = %document.id, "Session restored");
                Ok(Restored { configurator, document: Some(document), fallback: None })
            },
            Err(err) => {
                warn!(id = %document.id, error = %err, "Stored selection does not settle, starting from defaults");
                Ok(Restored {
                    configurator: Self::new(catalog, config)?,
                    document: Some(document),
                    fallback: Some(err),
                })
            },
        }
    }

    fn settled(catalog: Arc<Catalog>, config: EngineConfig, start: &ChoiceMap) -> Result<Self, EngineError> {
        let (choices, resolution) = Resolver::new(&catalog, &config).settle(start, None)?;
        debug!(slots = choices.len(), iterations = resolution.iterations, "Session started");
        Ok(Self { catalog, config, choices })
    }

    /// The settled selection.
    #[must_use]
    pub const fn choices(&self) -> &ChoiceMap {
        &self.choices
    }

    #[must_use]
    pub fn snapshot(&self) -> ChoiceMap {
        self.choices.clone()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies a user selection and settles.
    ///
    /// # Errors
    /// * [`EngineError::UnknownSlot`] if the catalog has no section for `slot`.
    /// * [`EngineError::UnknownValue`] if the section does not offer `value`.
    /// * [`EngineError::NotSelectable`] if the choice is hidden and hidden choices are rejected.
    /// * [`EngineError::CycleDetected`] if the rule cascade does not settle; the selection is
    ///   rolled back.
    pub fn request_change(
        &mut self,
        slot: SlotType,
        value: impl Into<ChoiceValue>,
    ) -> Result<Resolution, EngineError> {
        let value = value.into();
        let section = self.section(slot)?;

        if !section.offers(&value) {
            warn!(slot = %slot, value = %value, "Rejected unknown value");
            return Err(EngineError::UnknownValue { slot, value, context: None });
        }
        if self.config.reject_hidden_choices && !is_choice_visible(section, &value, &self.choices) {
            warn!(slot = %slot, value = %value, "Rejected hidden choice");
            return Err(EngineError::NotSelectable { slot, value, context: None });
        }

        debug!(slot = %slot, value = %value, "Change requested");
        self.commit(Some(Change::set(slot, value)))
    }

    /// Runs a pass without a new change; on a settled selection this is a no-op.
    ///
    /// # Errors
    /// Returns [`EngineError::CycleDetected`] if the selection does not settle.
    pub fn resettle(&mut self) -> Result<Resolution, EngineError> {
        self.commit(None)
    }

    /// Returns to the catalog defaults.
    ///
    /// # Errors
    /// Returns [`EngineError::CycleDetected`] if the defaults do not settle.
    pub fn reset(&mut self) -> Result<Resolution, EngineError> {
        let (choices, resolution) =
            Resolver::new(&self.catalog, &self.config).settle(self.catalog.defaults(), None)?;
        self.choices = choices;
        Ok(resolution)
    }

    /// Currently selectable choices for `slot`, in picker order.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownSlot`] if the catalog has no section for `slot`.
    pub fn options(&self, slot: SlotType) -> Result<Vec<&Choice>, EngineError> {
        Ok(visible_choices(self.section(slot)?, &self.choices))
    }

    /// Sections currently shown, in catalog order.
    #[must_use]
    pub fn visible_sections(&self) -> Vec<&Section> {
        self.catalog.sections().iter().filter(|s| is_section_visible(s, &self.choices)).collect()
    }

    fn section(&self, slot: SlotType) -> Result<&Section, EngineError> {
        self.catalog.section(slot).ok_or(EngineError::UnknownSlot { slot, context: None })
    }

    fn commit(&mut self, request: Option<Change>) -> Result<Resolution, EngineError> {
        match Resolver::new(&self.catalog, &self.config).settle(&self.choices, request) {
            Ok((choices, resolution)) => {
                self.choices = choices;
                Ok(resolution)
            },
            Err(err) => {
                warn!(error = %err, "Resolution aborted, selection rolled back");
                Err(err)
            },
        }
    }
}
