use std::borrow::Cow;

/// Error types specific to catalog loading and validation.
#[vanity_derive::vanity_error]
pub enum CatalogError {
    /// The catalog violates a structural rule and must not reach the engine.
    #[error("Invalid catalog{}: {message}", format_context(.context))]
    InvalidCatalog { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Serde serialization error with optional context.
    #[error("Catalog serialization error{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidCatalog { message: message.into(), context: None }
    }
}
