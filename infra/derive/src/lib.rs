#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the administration workspace.
//!
//! Only one macro lives here today: [`admin_error`], the attribute used by every crate
//! to declare its error enum. Consumers depend on this crate directly and on `thiserror`,
//! which the generated code refers to by absolute path.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring a crate's error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// * `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>`, and to
///   `Result<T, Source>` for every variant wrapping a source error.
/// * `From<Source>` for variants with a `source` field (or a `#[source]`/`#[from]` field).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant is present.
/// * A module-private `format_context` helper for use in `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. A `context` field must have the type `Option<Cow<'static, str>>`.
/// 3. Every variant that wraps a source error must also carry a `context` field.
///
/// Declare at most one such enum per module, since the `format_context` helper
/// is emitted next to it.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[admin_derive::admin_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<Vec<u8>, StoreError> {
///     let bytes = std::fs::read("store.bin").context("Reading store snapshot")?;
///     if bytes.is_empty() {
///         return Err("Empty snapshot".into());
///     }
///     Ok(bytes)
/// }
/// ```
#[proc_macro_attribute]
pub fn admin_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
