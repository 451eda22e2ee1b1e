//! Command handlers.
//!
//! Each handler translates parsed arguments into a use-case call on the core
//! and reports the result. Adapter wiring is shared here.

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod update;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ormforge_adapters::{LocalFilesystem, NpmPackageManager, SystemProcessRunner, YamlSchemaStore};
use ormforge_core::{
    application::{Filesystem, ScaffoldReport, ScaffoldService},
    error::ForgeResult,
};
use tracing::debug;

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[cfg(windows)]
const NPM_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
const NPM_PROGRAM: &str = "npm";

/// Wire the production adapters into a [`ScaffoldService`].
pub(crate) fn scaffold_service(config: &AppConfig) -> CliResult<ScaffoldService> {
    let defaults = config.completion_defaults()?;
    let backend = config.language_backend()?;

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let packages = NpmPackageManager::with_program(Arc::new(SystemProcessRunner::new()), NPM_PROGRAM);

    Ok(ScaffoldService::new(
        Arc::new(YamlSchemaStore::new(Arc::clone(&filesystem))),
        filesystem,
        Arc::new(packages),
        backend,
        defaults,
    ))
}

/// Absolute workspace path; the directory need not exist yet.
pub(crate) fn resolve_workspace(path: &Path) -> CliResult<PathBuf> {
    let resolved = if path.exists() {
        path.canonicalize()
    } else {
        std::path::absolute(path)
    };
    resolved.with_cli_context(|| format!("Failed to resolve workspace '{}'", path.display()))
}

/// Run a use case behind a spinner.
pub(crate) fn with_spinner<T>(
    output: &OutputManager,
    message: &str,
    f: impl FnOnce() -> ForgeResult<T>,
) -> CliResult<T> {
    let spinner = output.spinner(message);
    let result = f();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    Ok(result?)
}

pub(crate) fn print_report(output: &OutputManager, report: &ScaffoldReport) -> CliResult<()> {
    let relative = |path: &Path| -> String {
        path.strip_prefix(&report.workspace)
            .unwrap_or(path)
            .display()
            .to_string()
    };

    if let Some(config) = &report.config {
        output.info(&format!("Saved {}", relative(config)))?;
    }
    for id in report.installed() {
        output.success(&format!("Installed {id}"))?;
    }
    for path in &report.files.created {
        output.success(&format!("Created {}", relative(path)))?;
    }
    for path in &report.files.kept {
        debug!(path = %path.display(), "kept");
    }
    if let Some(model) = &report.model {
        output.success(&format!("Generated {}", relative(model)))?;
    }
    Ok(())
}
