use std::borrow::Cow;

/// Errors that can occur while configuring the logger or rendering a line.
#[strata_derive::strata_error]
pub enum LoggerError {
    /// The resolution engine rejected a configuration or an override.
    #[error("Resolution engine error{}: {source}", format_context(.context))]
    Engine { source: strata_engine::EngineError, context: Option<Cow<'static, str>> },

    /// Writing to the output sink failed.
    #[error("Output error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// JSON encoding of an entry failed.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Text rendering of an entry failed.
    #[error("Formatting error{}: {source}", format_context(.context))]
    Format { source: std::fmt::Error, context: Option<Cow<'static, str>> },

    /// A global tracing subscriber was already installed in this process.
    #[error("Tracing subscriber error{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// Invalid settings supplied to a builder.
    #[error("Invalid logger configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
