#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the strata crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! strata-derive = { path = "../infra/derive" }
//! ```
//!
//! The examples below are `ignore`d because proc-macro crates cannot use their own
//! macros in doctests; `tests/ui` holds compiled examples.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a crate error type.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error`, unless already derived.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(...)` to any
///   `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Conversions**: `From<Source>` for variants carrying a `source` field (or a
///   field marked `#[source]`/`#[from]`), and `From<&'static str>`/`From<String>`
///   when an `Internal { message, context }` variant exists.
/// * **Formatting**: a module-local `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// Every variant has named fields and a `context: Option<Cow<'static, str>>` field.
/// Tuple and unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[strata_derive::strata_error]
/// pub enum SinkError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn flush(out: &mut impl std::io::Write) -> Result<(), SinkError> {
///     out.flush().context("Flushing sink")
/// }
/// ```
#[proc_macro_attribute]
pub fn strata_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
