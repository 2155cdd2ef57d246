//! # Part Resolver
//!
//! Maps a settled selection to the concrete [`PartRecord`]s a renderer loads. This is a pure
//! projection: no rules, no visibility, just a lookup of the current value of every renderable
//! slot. Empty and `none` slots have no part.
//!
//! [`PartRecord`]: vanity_domain::PartRecord

mod part_catalog;

pub use part_catalog::{PartCatalog, RENDERABLE};
