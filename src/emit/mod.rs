//! Text emission backends
//!
//! This module holds the backend contract and its implementations. The walker drives a backend through the
//! [`Emitter`] trait; the backend decides layout and how each source construct is respelled in its target.
//!
//! ## Module Organization
//!
//! - `config` - Layout options shared by all backends
//! - `output` - Indentation-tracking sink with nested capture buffers
//! - `context` - Per-function-scope state used by rewrite policies
//! - `contract` - The `Emitter` trait and the views passed across it
//! - `cpp` - C++ backend (all rewrite policies active)
//! - `golang` - Canonical Go re-printer (identity policies)
//! - `registry` - Target name lookup

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod context;
pub mod contract;
pub mod cpp;
pub mod golang;
pub mod output;
pub mod registry;

pub use config::EmitConfig;
pub use context::{ContextStack, EmissionContext};
pub use contract::{
    AssignView, CompositeKind, Emitter, FieldView, FuncView, InterfaceEntry, Placeholder, RangeView, ReceiverView,
    SignatureView, SwitchView, TypeHint, TypeShape, TypeView, ValueView,
};
pub use cpp::CppEmitter;
pub use golang::GoEmitter;
pub use output::Output;
pub use registry::{TARGETS, TargetInfo, create_backend, lookup_target};
