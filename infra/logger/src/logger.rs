use crate::entry::{LogEntry, Metadata};
use crate::error::{LoggerError, LoggerErrorExt};
use crate::format::{Formatter, JsonFormatter, PlainTextFormatter};
use crate::level::Level;
use crate::sink::Sink;
use chrono::Utc;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use strata_engine::{Config, Layer, ModulePath, Resolver};
use tracing::warn;

/// Layer-attributed logger. Clones share the resolver, formatter and sink.
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

#[derive(Debug)]
struct LoggerInner {
    resolver: Resolver,
    formatter: Box<dyn Formatter>,
    sink: Sink,
    level: Level,
}

impl Logger {
    #[must_use = "The builder must be configured before it can be used to build a logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.inner.resolver
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.inner.level
    }

    /// Returns `true` if a line at `level` passes the minimum level.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.inner.level
    }

    /// Resolves the layer label for a module path.
    pub fn resolve(&self, path: impl AsRef<str>) -> Layer {
        self.inner.resolver.resolve(path)
    }

    pub fn debug(&self, path: impl AsRef<str>, message: impl fmt::Display) {
        self.log(Level::Debug, path, message);
    }

    pub fn info(&self, path: impl AsRef<str>, message: impl fmt::Display) {
        self.log(Level::Info, path, message);
    }

    pub fn warn(&self, path: impl AsRef<str>, message: impl fmt::Display) {
        self.log(Level::Warn, path, message);
    }

    pub fn error(&self, path: impl AsRef<str>, message: impl fmt::Display) {
        self.log(Level::Error, path, message);
    }

    pub fn test(&self, path: impl AsRef<str>, message: impl fmt::Display) {
        self.log(Level::Test, path, message);
    }

    pub fn log(&self, level: Level, path: impl AsRef<str>, message: impl fmt::Display) {
        self.log_with(level, path, message, Metadata::new());
    }

    /// Writes one line attributed to the layer of `path`.
    ///
    /// Lines below the logger's level are skipped before resolution. In strict
    /// mode a line whose layer is outside the allow-list is dropped with a
    /// diagnostic warning.
    pub fn log_with(
        &self,
        level: Level,
        path: impl AsRef<str>,
        message: impl fmt::Display,
        metadata: Metadata,
    ) {
        if !self.enabled(level) {
            return;
        }

        let path = path.as_ref();
        let layer = self.inner.resolver.resolve(path);
        if !self.inner.resolver.is_layer_allowed(&layer) {
            warn!(path, %layer, "Layer not allowed in strict mode, dropping log line");
            return;
        }

        let entry = LogEntry {
            level,
            layer,
            message: message.to_string(),
            timestamp: Utc::now(),
            metadata,
        };
        self.emit(&entry);
    }

    /// Formats and writes a prepared entry, bypassing level and layer checks.
    pub fn emit(&self, entry: &LogEntry) {
        if let Err(err) = self.write_entry(entry) {
            warn!(error = %err, layer = %entry.layer, "Failed to write log line");
        }
    }

    fn write_entry(&self, entry: &LogEntry) -> Result<(), LoggerError> {
        let line = self.inner.formatter.format(entry)?;
        self.inner.sink.write_line(&line).context("Writing log line")
    }

    /// Pins `name` as the layer of `path` and every path below it.
    pub fn set_layer_for(&self, path: impl AsRef<str>, name: impl Into<Cow<'static, str>>) {
        self.inner.resolver.set_explicit_layer(path, name);
    }

    /// Overrides the extraction depth of exactly `path`.
    ///
    /// # Errors
    /// Returns [`LoggerError::Engine`] if `depth` is negative.
    pub fn set_depth_for(&self, path: impl AsRef<str>, depth: i32) -> Result<(), LoggerError> {
        self.inner.resolver.set_explicit_depth(path, depth).context("Setting explicit depth")
    }

    /// Binds this logger to one module path.
    pub fn scope(&self, path: impl Into<ModulePath>) -> Scope {
        Scope { logger: self.clone(), path: path.into() }
    }
}

/// Builder for [`Logger`]. Defaults: [`Config::default`], [`Level::Info`],
/// plain text, stdout.
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
    level: Level,
    formatter: Box<dyn Formatter>,
    sink: Sink,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            level: Level::Info,
            formatter: Box::new(PlainTextFormatter),
            sink: Sink::Stdout,
        }
    }
}

impl LoggerBuilder {
    #[must_use = "The builder must be configured before it can be used to build a logger."]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[must_use = "The builder must be configured before it can be used to build a logger."]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "The builder must be configured before it can be used to build a logger."]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Shorthand for `formatter(JsonFormatter)`.
    #[must_use = "The builder must be configured before it can be used to build a logger."]
    pub fn json(self) -> Self {
        self.formatter(JsonFormatter)
    }

    #[must_use = "The builder must be configured before it can be used to build a logger."]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    /// # Errors
    /// Returns [`LoggerError::Engine`] if the resolver configuration is invalid.
    pub fn build(self) -> Result<Logger, LoggerError> {
        let resolver = Resolver::new(self.config).context("Building logger")?;
        Ok(Logger {
            inner: Arc::new(LoggerInner {
                resolver,
                formatter: self.formatter,
                sink: self.sink,
                level: self.level,
            }),
        })
    }
}

/// A [`Logger`] bound to one module path.
#[derive(Debug, Clone)]
pub struct Scope {
    logger: Logger,
    path: ModulePath,
}

impl Scope {
    #[must_use]
    pub const fn path(&self) -> &ModulePath {
        &self.path
    }

    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn layer(&self) -> Layer {
        self.logger.resolve(&self.path)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn test(&self, message: impl fmt::Display) {
        self.log(Level::Test, message);
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.logger.log(level, &self.path, message);
    }

    pub fn log_with(&self, level: Level, message: impl fmt::Display, metadata: Metadata) {
        self.logger.log_with(level, &self.path, message, metadata);
    }

    pub fn set_layer(&self, name: impl Into<Cow<'static, str>>) {
        self.logger.set_layer_for(&self.path, name);
    }

    /// # Errors
    /// Returns [`LoggerError::Engine`] if `depth` is negative.
    pub fn set_depth(&self, depth: i32) -> Result<(), LoggerError> {
        self.logger.set_depth_for(&self.path, depth)
    }
}
