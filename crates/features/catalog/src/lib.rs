//! # Rule Catalog
//!
//! The closed set of sections, choices, visibility predicates and transition rules that drive a
//! configuration session. A catalog is plain data: it can be authored in code ([`vanity`]),
//! stored as JSON, validated once at load and then shared read-only by every session.
//!
//! ## Structure
//!
//! * [`Section`]: one per slot, with a visibility [`Predicate`] and either a flat list of
//!   [`Choice`]s or predicate-gated [`ChoiceGroup`]s.
//! * [`TransitionRule`]: sets its owning slot when another slot changes to a matching value.
//!   Rules attached to a choice fire only while that choice is selected.
//! * [`RuleIndex`]: trigger slot to subscriptions in declaration order, built at construction.
//!
//! ```rust
//! use vanity_catalog::vanity;
//! use vanity_domain::SlotType;
//!
//! let catalog = vanity::catalog().unwrap();
//! assert!(catalog.section(SlotType::Color).is_some());
//! assert!(catalog.rule_cycles().is_empty());
//! ```

mod catalog;
mod error;
pub mod predicate;
pub mod rule;
pub mod section;
pub mod vanity;

pub use crate::catalog::Catalog;
pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::predicate::{Predicate, ValueMatch};
pub use crate::rule::{RuleIndex, Subscription, TransitionRule};
pub use crate::section::{Choice, ChoiceGroup, Options, Section};
