use crate::configurator::Configurator;
use crate::error::EngineError;
use crate::resolver::Resolution;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};
use vanity_event_bus::EventBus;

/// Broadcast after every committed resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub choices: ChoiceMap,
    pub resolution: Resolution,
}

/// A [`Configurator`] shared between threads.
///
/// Requests are serialized through a mutex so each one sees the fully settled result of the
/// previous. After each successful request the snapshot is published on the bus: the latest
/// [`ChoiceMap`] on a watch channel and a [`Settled`] event on a broadcast channel.
#[derive(Debug, Clone)]
pub struct SharedConfigurator {
    inner: Arc<Mutex<Configurator>>,
    events: EventBus,
}

impl SharedConfigurator {
    #[must_use]
    pub fn new(configurator: Configurator, events: EventBus) -> Self {
        if let Err(err) = events.publish_latest(configurator.snapshot()) {
            warn!(error = %err, "Initial snapshot not published");
        }
        Self { inner: Arc::new(Mutex::new(configurator)), events }
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    #[must_use]
    pub fn snapshot(&self) -> ChoiceMap {
        self.inner.lock().snapshot()
    }

    /// Runs `f` against the current state while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Configurator) -> R) -> R {
        f(&self.inner.lock())
    }

    /// As [`Configurator::request_change`], publishing the settled snapshot on success.
    ///
    /// # Errors
    /// As [`Configurator::request_change`].
    pub fn request_change(
        &self,
        slot: SlotType,
        value: impl Into<ChoiceValue>,
    ) -> Result<Resolution, EngineError> {
        let mut configurator = self.inner.lock();
        let resolution = configurator.request_change(slot, value)?;
        self.announce(configurator.snapshot(), resolution.clone());
        Ok(resolution)
    }

    /// As [`Configurator::reset`], publishing the settled snapshot on success.
    ///
    /// # Errors
    /// As [`Configurator::reset`].
    pub fn reset(&self) -> Result<Resolution, EngineError> {
        let mut configurator = self.inner.lock();
        let resolution = configurator.reset()?;
        self.announce(configurator.snapshot(), resolution.clone());
        Ok(resolution)
    }

    fn announce(&self, choices: ChoiceMap, resolution: Resolution) {
        if let Err(err) = self.events.publish_latest(choices.clone()) {
            warn!(error = %err, "Snapshot not published");
        }
        if let Err(err) = self.events.publish(Settled { choices, resolution }) {
            warn!(error = %err, "Settled event not published");
        }
    }
}
