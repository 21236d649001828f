//! Target registry: maps a target name to a backend.

use super::config::EmitConfig;
use super::contract::Emitter;
use super::cpp::CppEmitter;
use super::golang::GoEmitter;

/// Metadata for a registered target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    pub name: &'static str,
    /// File extension for translated output, without the dot
    pub extension: &'static str,
    pub description: &'static str,
}

pub const TARGETS: &[TargetInfo] = &[
    TargetInfo {
        name: "cpp",
        extension: "cpp",
        description: "C++ with goroutine, channel and defer support types",
    },
    TargetInfo {
        name: "go",
        extension: "go",
        description: "Canonical Go (identity re-printer)",
    },
];

pub fn lookup_target(name: &str) -> Option<&'static TargetInfo> {
    TARGETS.iter().find(|t| t.name == name)
}

/// Create a fresh backend for `name`, or `None` if the target is not registered.
pub fn create_backend(name: &str, config: EmitConfig) -> Option<Box<dyn Emitter>> {
    match name {
        "cpp" => Some(Box::new(CppEmitter::new(config))),
        "go" => Some(Box::new(GoEmitter::new(config))),
        _ => None,
    }
}
