//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::emit::{EmitConfig, TARGETS, create_backend, lookup_target};
use crate::walker::Walker;

use super::load::{load_module, render_error};
use super::{CliError, CliResult, ExitCode};

/// Translate the tree in `file` into `target`, writing to `output` or stdout.
pub fn translate_file(file: &Path, target: &str, config: EmitConfig, output: Option<&Path>) -> CliResult<ExitCode> {
    let Some(info) = lookup_target(target) else {
        let known: Vec<&str> = TARGETS.iter().map(|t| t.name).collect();
        return Err(CliError::failure(format!(
            "Error: unknown target '{target}' (available: {})",
            known.join(", ")
        )));
    };

    let module = load_module(file).map_err(|e| CliError::failure(render_error(&e)))?;
    let mut backend = create_backend(info.name, config)
        .ok_or_else(|| CliError::failure(format!("Error: no backend registered for '{}'", info.name)))?;

    match output {
        Some(path) => {
            let write_error = |e: io::Error| CliError::failure(format!("Error writing {}: {}", path.display(), e));
            let mut file = fs::File::create(path).map_err(write_error)?;
            Walker::translate_to(&module, backend.as_mut(), &mut file).map_err(write_error)?;
            tracing::debug!(target = info.name, path = %path.display(), "wrote translated file");
        }
        None => {
            let mut stdout = io::stdout().lock();
            Walker::translate_to(&module, backend.as_mut(), &mut stdout)
                .map_err(|e| CliError::failure(format!("Error writing output: {e}")))?;
            tracing::debug!(target = info.name, "translation finished");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print every registered target with its file extension.
pub fn list_targets() -> CliResult<ExitCode> {
    let width = TARGETS.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut listing = String::new();
    for target in TARGETS {
        listing.push_str(&format!(
            "{:width$}  .{:<4} {}\n",
            target.name, target.extension, target.description
        ));
    }
    write_stdout(&listing)?;
    Ok(ExitCode::SUCCESS)
}

/// Pretty-print the loaded tree (debug).
pub fn dump_tree(file: &Path) -> CliResult<ExitCode> {
    let module = load_module(file).map_err(|e| CliError::failure(render_error(&e)))?;
    let mut text = serde_json::to_string_pretty(&module)
        .map_err(|e| CliError::failure(format!("Error serializing tree: {e}")))?;
    text.push('\n');
    write_stdout(&text)?;
    Ok(ExitCode::SUCCESS)
}

fn write_stdout(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| CliError::failure(format!("Error writing output: {e}")))
}
