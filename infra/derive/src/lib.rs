#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the configurator crates.
//!
//! Every slice crate describes its failures with a single error enum. The
//! [`macro@vanity_error`] attribute turns such an enum into a `thiserror` error with
//! context propagation, so call sites read `lookup().context("Loading catalog")?`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! vanity-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining slice error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Standard Conversions**: Implements `From<Source>` for variants holding a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Variant Names**: Generates `fn kind(&self) -> &'static str` for structured logging.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants must use named fields; tuple and unit variants are rejected.
/// 3. A variant wrapping a source error must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[vanity_derive::vanity_error]
/// pub enum CatalogError {
///     #[error("Catalog file unreadable{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String, CatalogError> {
///     std::fs::read_to_string(path).context("Reading catalog file")
/// }
/// ```
#[proc_macro_attribute]
pub fn vanity_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
