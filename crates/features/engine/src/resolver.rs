//! The resolution loop.
//!
//! One pass takes an optional requested change and drives a working copy of the selection to a
//! fixpoint:
//!
//! 1. drain the pending queue first-in first-out, applying each change and enqueueing the
//!    changes requested by the rules it fires;
//! 2. when the queue is empty, clear the first stale slot in catalog order (a value whose
//!    section or choice is hidden) and go back to 1;
//! 3. otherwise auto-select the first visible choice of the first visible, empty section and
//!    go back to 1;
//! 4. stop when neither step finds work.
//!
//! Every applied or attempted change counts against the iteration cap. Exceeding it aborts the
//! pass with [`EngineError::CycleDetected`]; the caller's selection is never touched because
//! the pass only works on a copy.

use crate::change::Change;
use crate::dispatcher::Dispatcher;
use crate::error::EngineError;
use crate::visibility::{first_visible_choice, is_choice_visible, is_section_visible};
use std::collections::VecDeque;
use tracing::{debug, trace};
use vanity_catalog::Catalog;
use vanity_domain::config::EngineConfig;
use vanity_domain::{ChoiceMap, SlotType};

/// Slots kept for cycle diagnostics.
const TRAIL_LEN: usize = 8;

/// Summary of a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Changes processed, including those that turned out to be no-ops.
    pub iterations: usize,
    /// Slots whose entry changed, in first-touch order.
    pub touched: Vec<SlotType>,
}

/// Drives selections to a fixpoint against one catalog.
#[derive(Debug)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    dispatcher: Dispatcher<'a>,
    max_iterations: usize,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, config: &EngineConfig) -> Self {
        Self { catalog, dispatcher: Dispatcher::new(catalog.rules()), max_iterations: config.max_iterations }
    }

    /// Runs one pass from `start`, optionally beginning with `request`.
    ///
    /// # Errors
    /// Returns [`EngineError::CycleDetected`] when the pass exceeds the iteration cap.
    pub fn settle(
        &self,
        start: &ChoiceMap,
        request: Option<Change>,
    ) -> Result<(ChoiceMap, Resolution), EngineError> {
        let mut choices = start.clone();
        let mut queue: VecDeque<Change> = request.into_iter().collect();
        let mut trail: VecDeque<SlotType> = VecDeque::with_capacity(TRAIL_LEN);
        let mut resolution = Resolution::default();

        loop {
            while let Some(change) = queue.pop_front() {
                resolution.iterations += 1;
                if resolution.iterations > self.max_iterations {
                    return Err(EngineError::CycleDetected {
                        iterations: self.max_iterations,
                        trail: trail.into_iter().collect(),
                        context: None,
                    });
                }

                let Some(published) = change.apply(&mut choices) else { continue };
                trace!(slot = %change.slot, value = %published, "Change applied");

                if trail.len() == TRAIL_LEN {
                    trail.pop_front();
                }
                trail.push_back(change.slot);
                if !resolution.touched.contains(&change.slot) {
                    resolution.touched.push(change.slot);
                }

                queue.extend(self.dispatcher.publish(change.slot, &published, &choices));
            }

            match self.stale(&choices).or_else(|| self.autofill(&choices)) {
                Some(change) => queue.push_back(change),
                None => break,
            }
        }

        debug!(iterations = resolution.iterations, touched = ?resolution.touched, "Selection settled");
        Ok((choices, resolution))
    }

    /// The first entry that must go: a slot without a section, a value whose section or
    /// choice is hidden, or a `none` the section neither offers nor preserves.
    fn stale(&self, choices: &ChoiceMap) -> Option<Change> {
        if let Some(orphan) = choices.slots().find(|slot| self.catalog.section(*slot).is_none()) {
            return Some(Change::clear(orphan, false));
        }

        self.catalog.sections().iter().find_map(|section| {
            let value = choices.get(section.slot)?;
            let preserve = section.preserves_null();
            let visible = is_choice_visible(section, value, choices);
            if value.is_none() {
                (!preserve && !visible).then(|| Change::clear(section.slot, false))
            } else {
                (!visible).then(|| Change::clear(section.slot, preserve))
            }
        })
    }

    /// Selection for the first visible section with an empty slot.
    fn autofill(&self, choices: &ChoiceMap) -> Option<Change> {
        self.catalog
            .sections()
            .iter()
            .filter(|section| !choices.contains(section.slot) && is_section_visible(section, choices))
            .find_map(|section| {
                let choice = first_visible_choice(section, choices)?;
                trace!(slot = %section.slot, value = %choice.value, "Auto-selecting");
                Some(Change::set(section.slot, choice.value.clone()))
            })
    }
}
