#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the provisioning crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! ggp-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! The generated code names `::thiserror` directly, so every consumer must depend on it.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring a crate's error enum.
///
/// # Features
///
/// * **Automatic Derives**: Adds `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait with `.context(...)` for
///   `Result<T, Name>` and for `Result<T, Source>` of every wrapped source error.
/// * **Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]` / `#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Display Helper**: Emits a private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. `context` fields must be typed `Option<Cow<'static, str>>`.
/// 4. A variant with a source field must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use ggp_derive::ggp_error;
/// use std::borrow::Cow;
///
/// #[ggp_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn port(cfg: &config::Config) -> Result<i64, ConfigError> {
///     cfg.get_int("server.port").context("Reading server.port")
/// }
/// ```
#[proc_macro_attribute]
pub fn ggp_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
