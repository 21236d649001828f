#![forbid(unsafe_code)]
//! goshift: syntax-directed translation of Go syntax trees
//!
//! A parsed Go source file arrives as a read-only [`Module`] tree. The [`walker`] visits every node exactly
//! once and drives a backend through the [`emit::Emitter`] contract; the backend decides how each construct
//! is spelled in its target and owns the state its rewrites need.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli`, `emit` and
//!   `walker` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Untranslatable input**: never an error. The walker replaces the node with a placeholder comment and
//!   keeps going, so a translation always produces text.
//!
//! - **True invariants**: An unbalanced capture or context stack is a translator bug, not bad input. Use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;
pub mod emit;
pub mod walker;

pub use goshift_syntax::ast;
pub use goshift_syntax::ast::Module;

pub use emit::{CppEmitter, EmitConfig, Emitter, GoEmitter, TARGETS, create_backend, lookup_target};
pub use walker::{Walker, translate_target};
