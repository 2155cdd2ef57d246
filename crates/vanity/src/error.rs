use std::borrow::Cow;
use vanity_catalog::CatalogError;
use vanity_engine::EngineError;
use vanity_session::SessionError;

/// Errors surfaced while wiring or driving the platform.
#[vanity_derive::vanity_error]
pub enum PlatformError {
    #[error("Catalog error{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    #[error("Engine error{}: {source}", format_context(.context))]
    Engine { source: EngineError, context: Option<Cow<'static, str>> },

    #[error("Session error{}: {source}", format_context(.context))]
    Session { source: SessionError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal platform error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
