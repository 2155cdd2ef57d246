//! # Pricing
//!
//! Pure price projection of a settled selection.
//!
//! Each [`Category`] is priced by a table lookup keyed on slot values. A category mask selects
//! what to price: [`Category::TOTAL`] (the empty mask) prices everything, any other mask prices
//! the categories it names. Because the single-category masks are disjoint, the total always
//! equals the sum of the [`line_items`].
//!
//! Lookups that miss contribute zero; pricing never fails.
//!
//! [`Category`]: vanity_domain::Category
//! [`Category::TOTAL`]: vanity_domain::Category::TOTAL

mod price_list;

pub use price_list::{LineItem, PriceList, line_items, price};
