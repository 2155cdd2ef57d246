//! Facade crate for the vanity configurator.
//! Re-exports the domain, kernel and feature slices and wires them together in [`Platform`].
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`AppConfig`](domain::config::AppConfig) with
//!   [`kernel::config::load_app_config`].
//! - Call [`Platform::init`] once, then open sessions and quote their selections.

mod error;
mod platform;

pub use crate::error::{PlatformError, PlatformErrorExt};
pub use crate::platform::{Platform, Quote, Session};
pub use vanity_domain as domain;
pub use vanity_kernel as kernel;

/// Feature slices, re-exported for direct use.
pub mod features {
    pub use vanity_catalog as catalog;
    pub use vanity_engine as engine;
    pub use vanity_event_bus as events;
    pub use vanity_parts as parts;
    pub use vanity_pricing as pricing;
    pub use vanity_session as session;
}
