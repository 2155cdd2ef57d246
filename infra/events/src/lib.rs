//! # Event Bus
//!
//! A small, type-safe hub that hands settled state to asynchronous collaborators (persistence,
//! rendering) without coupling them to the code that produces it.
//!
//! Each event type is bound to one channel kind on first use:
//!
//! * **Broadcast**: every subscriber sees every event (fan-out, bounded, lagging receivers skip).
//! * **Watch**: subscribers only ever see the latest value.
//!
//! # Example
//!
//! ```rust
//! use vanity_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Saved { revision: u64 }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<Saved>()?;
//!     bus.publish(Saved { revision: 3 })?;
//!
//!     assert_eq!(EventReceiverExt::recv(&mut rx).await.map(|e| e.revision), Some(3));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
