//! Provide the canonical source-language vocabulary shared by the goshift syntax tree and its backends.
//!
//! This crate is intentionally small and dependency-light. It contains the closed token sets that appear in
//! the syntax tree (operators, assignment tokens, branch keywords, channel directions, literal kinds) and the
//! table of well-known packages whose imports map onto support headers in the generated code.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global mutable state, and no tree types.
//! - Every token knows its canonical source spelling via `as_str()`; backends decide how to respell it.

pub mod lang;

pub use lang::packages::{PackageInfo, default_import_name, lookup_package};
pub use lang::tokens::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKeyword, IncDecOp, LitKind, UnaryOp};
