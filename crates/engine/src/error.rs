//! # Engine Errors
//!
//! This module defines the [`EngineError`] enum returned by the override entry points
//! and by configuration validation.

use std::borrow::Cow;

/// Errors reported by the layer resolution engine.
#[strata_derive::strata_error]
pub enum EngineError {
    /// A caller passed a value outside the accepted domain (e.g., a negative depth).
    #[error("Invalid argument{}: {message}", format_context(.context))]
    InvalidArgument { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The [`Config`](crate::Config) failed validation.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
