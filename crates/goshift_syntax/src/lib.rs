//! Read-only syntax tree for the goshift translator.
//!
//! The tree is delivered by an external parser (or deserialized from its JSON hand-off) and consumed by the
//! walker without modification.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name resolution or type checking.
//! - Token vocabulary (operators, keywords) comes from `goshift_core::lang`.
//!
//! ## Examples
//! ```rust
//! use goshift_syntax::builders::*;
//!
//! let m = module("main", vec![func("main", sig(vec![], None), vec![])]);
//! assert_eq!(m.decls.len(), 1);
//! ```

pub mod ast;
pub mod builders;

pub use ast::{Decl, Expr, Module, Spanned, Stmt};
