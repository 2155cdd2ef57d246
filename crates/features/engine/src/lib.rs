//! # Resolution Engine
//!
//! Keeps a vanity configuration consistent while the user changes it.
//!
//! A [`Configurator`] owns the current selection. Each [`Configurator::request_change`] is
//! validated against the catalog and then settled by the [`Resolver`]:
//!
//! * the change is applied and published to the rules subscribed to its slot;
//! * fired rules queue further changes, processed first-in first-out;
//! * values that became hidden are cleared, empty visible sections are auto-filled;
//! * the pass stops at a fixpoint or fails with [`EngineError::CycleDetected`].
//!
//! Failed requests never leave a partially resolved selection behind.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use vanity_catalog::vanity;
//! use vanity_domain::{SlotType, config::EngineConfig};
//! use vanity_engine::{Configurator, EngineError};
//!
//! fn main() -> Result<(), EngineError> {
//!     let catalog = Arc::new(vanity::catalog()?);
//!     let mut cfg = Configurator::new(catalog, EngineConfig::default())?;
//!
//!     cfg.request_change(SlotType::Breadth, 40)?;
//!     assert_eq!(cfg.choices().text(SlotType::Color), Some("VC-40-60-WHITE"));
//!     Ok(())
//! }
//! ```

mod change;
mod configurator;
mod dispatcher;
mod error;
mod resolver;
mod shared;
pub mod visibility;

pub use change::Change;
pub use configurator::{Configurator, Restored};
pub use dispatcher::Dispatcher;
pub use error::{EngineError, EngineErrorExt};
pub use resolver::{Resolution, Resolver};
pub use shared::{Settled, SharedConfigurator};
