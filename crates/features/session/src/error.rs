use std::borrow::Cow;

/// Error types specific to session documents.
#[vanity_derive::vanity_error]
pub enum SessionError {
    /// Serde JSON error with optional context.
    #[error("Session JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Postcard serialization error with optional context.
    #[error("Session binary error{}: {source}", format_context(.context))]
    Binary { source: postcard::Error, context: Option<Cow<'static, str>> },

    #[error("Session I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The document was written by a newer format revision.
    #[error("Unsupported session version {version}{}", format_context(.context))]
    UnsupportedVersion { version: u16, context: Option<Cow<'static, str>> },

    /// The id cannot safely name a session file.
    #[error("Invalid session id '{id}'{}", format_context(.context))]
    InvalidId { id: String, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
