//! Well-known package vocabulary.
//!
//! Maps import paths of the source language's standard packages onto the support headers a generated C++
//! translation unit includes. Paths are matched without their surrounding quotes.

/// Metadata for a well-known package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageInfo {
    /// Import path as written in source, without quotes (e.g. `"fmt"` → `fmt`).
    pub path: &'static str,
    /// Support header providing the package's stand-ins.
    pub cpp_header: &'static str,
}

/// Registry of packages with a known support header.
pub const PACKAGES: &[PackageInfo] = &[
    PackageInfo { path: "fmt", cpp_header: "fmt.h" },
    PackageInfo { path: "sync", cpp_header: "sync.h" },
    PackageInfo { path: "errors", cpp_header: "errors.h" },
    // `time.h` collides with the C header of the same name.
    PackageInfo { path: "time", cpp_header: "go_time.h" },
    PackageInfo { path: "strings", cpp_header: "go_strings.h" },
    PackageInfo { path: "os", cpp_header: "go_os.h" },
];

/// Look up a package by import path. Surrounding `"` or `` ` `` quotes are ignored.
pub fn lookup_package(path: &str) -> Option<&'static PackageInfo> {
    let bare = path.trim_matches(|c| c == '"' || c == '`');
    PACKAGES.iter().find(|p| p.path == bare)
}

/// Local name an import binds when it has no explicit alias: the last path segment.
pub fn default_import_name(path: &str) -> &str {
    let bare = path.trim_matches(|c| c == '"' || c == '`');
    bare.rsplit('/').next().unwrap_or(bare)
}
