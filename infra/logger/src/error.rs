use std::borrow::Cow;

/// Failures while installing the subscriber from [`LoggingConfig`](vanity_domain::config::LoggingConfig).
#[vanity_derive::vanity_error]
pub enum LoggerError {
    /// `logging.directory` exists but the rolling appender cannot open files in it.
    #[error("Log file error{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// A global subscriber is already installed in this process.
    #[error("Subscriber already installed{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Log directory error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// A `logging` setting that cannot be applied.
    #[error("Invalid logging configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
