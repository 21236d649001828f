//! Syntax tree loading
//!
//! The parser hands trees over as JSON (the serde form of [`Module`]). Loading is the only fallible step of
//! a translation, so its errors carry enough context for `miette` to point at the offending byte.

use std::fs;
use std::path::{Path, PathBuf};

use goshift_syntax::ast::Module;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while reading a serialized tree
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("cannot read {}", path.display())]
    #[diagnostic(code(goshift::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed syntax tree at line {line}, column {column}: {message}")]
    #[diagnostic(
        code(goshift::load::json),
        help("the input must be a module tree serialized as JSON (see `goshift dump`)")
    )]
    Json {
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        at: SourceSpan,
    },

    #[error("the root of {name} is not a module")]
    #[diagnostic(
        code(goshift::load::not_a_module),
        help("expected an object with `name` and `decls` fields at the top level")
    )]
    NotAModule { name: String },
}

/// Read and decode the tree stored at `path`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_module(path: &Path) -> Result<Module, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_module(&path.display().to_string(), &text)
}

/// Decode a tree from JSON text; `name` labels the source in diagnostics.
pub fn parse_module(name: &str, text: &str) -> Result<Module, LoadError> {
    // Syntax errors first, so a truncated file is not reported as a wrong root.
    let root: serde_json::Value = serde_json::from_str(text).map_err(|e| json_error(name, text, &e))?;
    let is_module = root
        .as_object()
        .is_some_and(|obj| obj.contains_key("name") && obj.contains_key("decls"));
    if !is_module {
        return Err(LoadError::NotAModule { name: name.to_string() });
    }

    let module: Module = serde_json::from_str(text).map_err(|e| json_error(name, text, &e))?;
    tracing::debug!(module = %module.name, decls = module.decls.len(), "loaded syntax tree");
    Ok(module)
}

fn json_error(name: &str, text: &str, err: &serde_json::Error) -> LoadError {
    let offset = byte_offset(text, err.line(), err.column());
    LoadError::Json {
        message: err.to_string(),
        line: err.line(),
        column: err.column(),
        src: NamedSource::new(name, text.to_string()),
        at: SourceSpan::from((offset, 0)),
    }
}

/// Convert a 1-based line and column into a byte offset, clamped to the text.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

/// Render a load error the way the terminal shows it, without colors.
pub fn render_error(err: &LoadError) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, err).is_err() {
        return err.to_string();
    }
    out
}
