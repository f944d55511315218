#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates.
//! Currently this is the error-enum attribute used by every library crate
//! (`ragcfg-blob`, `ragcfg-logger`, `ragcfg-kernel`, `ragcfg-config-store`).

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a plain enum into a context-carrying error type.
///
/// # Injected Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A companion `<Name>Ext` trait with `.context(...)` for `Result<T, Name>` and,
///   for every variant holding a `source`, for `Result<T, Source>` as well.
/// * `From<Source>` for each source-carrying variant, so `?` works on upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A variant with a `source` (or a field marked `#[source]`/`#[from]`) must also
///    have `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use ragcfg_derive::ragcfg_error;
/// use std::borrow::Cow;
///
/// #[ragcfg_error]
/// pub enum StoreError {
///     #[error("Decode failure{}: {source}", format_context(.context))]
///     Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(bytes: &[u8]) -> Result<serde_json::Value, StoreError> {
///     serde_json::from_slice(bytes).context("Decoding active document")
/// }
/// ```
#[proc_macro_attribute]
pub fn ragcfg_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
