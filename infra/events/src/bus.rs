use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{trace, warn};

/// Default broadcast buffer; settled snapshots are small and rare.
const DEFAULT_CAPACITY: usize = 64;

/// Channel kind an event type is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Fan-out; each subscriber sees every event.
    Broadcast { capacity: usize },
    /// Latest-value; subscribers see only the newest event.
    Watch,
}

impl ChannelKind {
    const fn same_kind(self, other: Self) -> bool {
        matches!((self, other), (Self::Broadcast { .. }, Self::Broadcast { .. }) | (Self::Watch, Self::Watch))
    }
}

/// Marker trait for types that can travel over the [`EventBus`].
///
/// Implemented for every `Send + Sync + 'static` type.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct Channel {
    kind: ChannelKind,
    sender: Box<dyn Any + Send + Sync>,
}

/// Type-indexed registry of broadcast and watch channels.
///
/// Cloning is cheap; clones share the same channels.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Channel>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to broadcast events of type `T` with the default capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a watch channel.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to broadcast events of type `T`.
    ///
    /// The capacity only applies when this call creates the channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] for a zero capacity and
    /// [`EventBusError::ChannelKindMismatch`] if `T` is bound to a watch channel.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "broadcast capacity must be at least 1".into(),
                context: Some(type_name::<T>().into()),
            });
        }
        let sender = self.sender::<T, broadcast::Sender<Arc<T>>>(
            ChannelKind::Broadcast { capacity },
            || broadcast::channel(capacity).0,
        )?;
        Ok(sender.subscribe())
    }

    /// Publishes a broadcast event; returns how many subscribers received it.
    ///
    /// Events published before anyone subscribes are dropped.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a watch channel.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let sender = self.sender::<T, broadcast::Sender<Arc<T>>>(
            ChannelKind::Broadcast { capacity: DEFAULT_CAPACITY },
            || broadcast::channel(DEFAULT_CAPACITY).0,
        )?;

        let delivered = sender.send(Arc::new(event)).unwrap_or(0);
        trace!(event = type_name::<T>(), delivered, "Event broadcast");
        Ok(delivered)
    }

    /// Subscribes to the latest value of type `T`, seeding the channel with `initial` when it
    /// does not exist yet.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    pub fn watch<T: Event>(&self, initial: T) -> Result<watch::Receiver<Arc<T>>, EventBusError> {
        let sender = self.sender::<T, watch::Sender<Arc<T>>>(ChannelKind::Watch, || {
            watch::channel(Arc::new(initial)).0
        })?;
        Ok(sender.subscribe())
    }

    /// Replaces the latest value of type `T`, creating the channel when missing.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    pub fn publish_latest<T: Event>(&self, value: T) -> Result<(), EventBusError> {
        let value = Arc::new(value);
        let seed = Arc::clone(&value);
        let sender = self
            .sender::<T, watch::Sender<Arc<T>>>(ChannelKind::Watch, || watch::channel(seed).0)?;
        sender.send_replace(value);
        trace!(event = type_name::<T>(), "Latest value replaced");
        Ok(())
    }

    /// The latest value of type `T`, if a watch channel exists for it.
    #[must_use]
    pub fn latest<T: Event>(&self) -> Option<Arc<T>> {
        let channels = self.channels.read();
        let channel = channels.get(&TypeId::of::<T>())?;
        channel.sender.downcast_ref::<watch::Sender<Arc<T>>>().map(|tx| Arc::clone(&tx.borrow()))
    }

    /// Drops every channel; subscribers observe closure. Returns the number of channels closed.
    #[must_use]
    pub fn close(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    /// Returns a clone of the sender bound to `T`, creating it with `make` when absent.
    fn sender<T: Event, S>(&self, kind: ChannelKind, make: impl FnOnce() -> S) -> Result<S, EventBusError>
    where
        S: Any + Clone + Send + Sync,
    {
        let id = TypeId::of::<T>();
        if let Some(channel) = self.channels.read().get(&id) {
            return existing::<T, S>(channel, kind);
        }

        let mut channels = self.channels.write();
        // Another caller may have won the race between the two locks.
        if let Some(channel) = channels.get(&id) {
            return existing::<T, S>(channel, kind);
        }

        trace!(event = type_name::<T>(), ?kind, "Creating event channel");
        let sender = make();
        channels.insert(id, Channel { kind, sender: Box::new(sender.clone()) });
        Ok(sender)
    }
}

fn existing<T: Event, S: Any + Clone>(channel: &Channel, requested: ChannelKind) -> Result<S, EventBusError> {
    if !channel.kind.same_kind(requested) {
        return Err(EventBusError::ChannelKindMismatch {
            message: format!("requested {requested:?} but found {:?}", channel.kind).into(),
            context: Some(type_name::<T>().into()),
        });
    }
    if let (ChannelKind::Broadcast { capacity: have }, ChannelKind::Broadcast { capacity: want }) =
        (channel.kind, requested)
        && have != want
        && want != DEFAULT_CAPACITY
    {
        warn!(event = type_name::<T>(), have, want, "Broadcast channel already exists with another capacity");
    }

    channel.sender.downcast_ref::<S>().cloned().ok_or_else(|| EventBusError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected sender type".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Revision(u64);

    #[test]
    fn zero_capacity_is_rejected() {
        let bus = EventBus::new();
        let err = bus.subscribe_with_capacity::<Revision>(0).unwrap_err();
        assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
    }

    #[test]
    fn kinds_cannot_be_mixed_for_one_type() {
        let bus = EventBus::new();
        let _rx = bus.watch(Revision(0)).unwrap();
        let err = bus.publish(Revision(1)).unwrap_err();
        assert!(matches!(err, EventBusError::ChannelKindMismatch { .. }));
    }

    #[test]
    fn latest_reads_watch_channels_only() {
        let bus = EventBus::new();
        assert!(bus.latest::<Revision>().is_none());

        bus.publish_latest(Revision(4)).unwrap();
        assert_eq!(bus.latest::<Revision>().as_deref(), Some(&Revision(4)));

        bus.publish(7_u32).unwrap();
        assert!(bus.latest::<u32>().is_none());
    }

    #[test]
    fn publish_without_subscribers_delivers_nothing() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(Revision(1)).unwrap(), 0);
        assert_eq!(bus.close(), 1);
    }
}
