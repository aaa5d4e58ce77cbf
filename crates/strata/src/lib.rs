//! Facade crate for the layer resolution engine and its logging front-end.
//! Keep this crate thin: it composes the other crates and implements nothing itself.
//!
//! ## Usage
//! - Depend on `strata` with the default `logger` feature for the full front-end.
//! - Disable default features to embed only the [`engine`] (resolver and config).
//!
//! ```rust
//! # #[cfg(feature = "logger")]
//! # fn main() -> Result<(), strata::LoggerError> {
//! let logger = strata::Logger::builder().build()?;
//! strata::info!(logger, "Application started");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "logger"))]
//! # fn main() {}
//! ```

pub use strata_engine as engine;
pub use strata_engine::{
    Config, ConfigBuilder, EngineError, Layer, ModulePath, Resolver, UNKNOWN_LABEL, extract,
};

#[cfg(feature = "logger")]
pub use strata_logger as logger;
#[cfg(feature = "logger")]
pub use strata_logger::{
    Diagnostics, Formatter, JsonFormatter, Level, LevelFilter, LogEntry, Logger, LoggerBuilder,
    LoggerError, Metadata, PlainTextFormatter, Scope, SharedBuffer, Sink, debug, error, here,
    info, log, scope, set_depth, set_layer, warn,
};

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    "engine",
    #[cfg(feature = "logger")]
    "logger",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}
