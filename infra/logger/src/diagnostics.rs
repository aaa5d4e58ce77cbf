//! Installs the process-wide `tracing` subscriber that receives the engine's own
//! diagnostics (cache misses, override writes, dropped strict-mode lines).
//!
//! Application log lines never pass through here; they go straight to the
//! [`Sink`](crate::Sink) of their [`Logger`](crate::Logger).

use crate::error::LoggerError;
use std::io;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Entry point for [`DiagnosticsBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics;

impl Diagnostics {
    #[must_use = "The builder must be configured before it can be used to initialize diagnostics."]
    pub const fn builder() -> DiagnosticsBuilder {
        DiagnosticsBuilder { level: LevelFilter::WARN, env_filter: None, ansi: true, json: false }
    }
}

/// Configures the global subscriber. Output always goes to stderr.
#[derive(Debug)]
pub struct DiagnosticsBuilder {
    level: LevelFilter,
    env_filter: Option<String>,
    ansi: bool,
    json: bool,
}

impl DiagnosticsBuilder {
    /// Default maximum level when `RUST_LOG` is unset.
    #[must_use = "The builder must be configured before it can be used to initialize diagnostics."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Programmatic directives such as `strata_engine=trace`. Replaces `RUST_LOG`.
    #[must_use = "The builder must be configured before it can be used to initialize diagnostics."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize diagnostics."]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize diagnostics."]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unparsable filter and
    /// [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<(), LoggerError> {
        let env_filter = self.build_env_filter()?;

        let fmt_layer = layer().with_writer(io::stderr);
        let fmt_layer = if self.json {
            fmt_layer.json().boxed()
        } else {
            fmt_layer.compact().with_ansi(self.ansi).boxed()
        };

        tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init()?;
        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                    context: None,
                })
            },
        )
    }
}
