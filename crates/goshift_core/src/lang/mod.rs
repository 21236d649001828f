//! Source-language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `BinaryOp::AndNot`) and look up spellings via `as_str()` or the
//! `from_str` helpers, instead of comparing token strings across the translator.
//!
//! ## Examples
//! ```rust
//! use goshift_core::lang::tokens::{self, BinaryOp};
//!
//! assert_eq!(tokens::binary_from_str("&^"), Some(BinaryOp::AndNot));
//! assert_eq!(BinaryOp::AndNot.as_str(), "&^");
//! ```

pub mod packages;
pub mod tokens;
