//! # Session Documents
//!
//! A session document is the persisted form of one configuration session: the [`ChoiceMap`]
//! keyed by slot name with scalar or `null` values, plus free-form metadata (any JSON value per key).
//!
//! Two encodings are supported:
//!
//! * **JSON** for external stores and humans; choices serialize as
//!   `{"breadth": 46, "top": "insert-basin", "handle": null}`.
//! * **Binary** (postcard) for compact local caches.
//!
//! [`SessionDocument::decode`] accepts either and tells them apart by the first byte.
//!
//! Session ids double as file names, so decoding and [`SessionDocument::save`] reject ids
//! outside `[A-Za-z0-9_-]`.
//!
//! [`ChoiceMap`]: vanity_domain::ChoiceMap

mod document;
mod error;
mod metadata;

pub use crate::document::{FORMAT_VERSION, MAX_ID_LEN, SessionDocument};
pub use crate::metadata::Metadata;
pub use crate::error::{SessionError, SessionErrorExt};
