//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, rules or pricing tables, just data and simple helpers.

pub mod choice_map;
pub mod config;
pub mod part;
pub mod pricing;
pub mod slot;
pub mod value;

pub use choice_map::ChoiceMap;
pub use part::PartRecord;
pub use pricing::{Amount, Category};
pub use slot::SlotType;
pub use value::ChoiceValue;
