//! # Logger
//!
//! Structured logging front-end for the layer resolution engine. Every line is
//! attributed to the layer of the module that produced it.
//!
//! * [`Logger`] resolves the module path of a call site, applies the minimum
//!   [`Level`] and strict-mode allow-list, formats the line and writes it to a [`Sink`].
//! * [`PlainTextFormatter`] renders `[LEVEL] [LAYER] [timestamp] message key=value`,
//!   [`JsonFormatter`] renders one JSON object per line.
//! * The [`info!`], [`set_layer!`] and related macros capture the caller's
//!   module with `module_path!()`; [`Scope`] binds a path once.
//! * [`Diagnostics`] installs the global `tracing` subscriber for the crates'
//!   own diagnostic events.
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), strata_logger::LoggerError> {
//! use strata_logger::{Level, Logger, Metadata, SharedBuffer, Sink};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder().level(Level::Debug).sink(Sink::Buffer(buffer.clone())).build()?;
//!
//! logger.set_layer_for("app/internal/db", "Database");
//! logger.log_with(
//!     Level::Info,
//!     "app/internal/db/postgres",
//!     "Connected",
//!     Metadata::new().with("pool", 8),
//! );
//!
//! assert!(buffer.contents().starts_with("[INFO] [Database] ["));
//! assert!(buffer.contents().trim_end().ends_with("Connected pool=8"));
//! # Ok(())
//! # }
//! ```

mod diagnostics;
mod entry;
mod error;
mod format;
mod level;
mod logger;
mod macros;
mod sink;

pub use crate::diagnostics::{Diagnostics, DiagnosticsBuilder};
pub use crate::entry::{LogEntry, Metadata};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::format::{Formatter, JsonFormatter, PlainTextFormatter};
pub use crate::level::Level;
pub use crate::logger::{Logger, LoggerBuilder, Scope};
pub use crate::sink::{SharedBuffer, Sink};
pub use strata_engine::{Config, Layer, ModulePath};
pub use tracing::level_filters::LevelFilter;
