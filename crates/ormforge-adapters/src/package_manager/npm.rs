//! npm-backed package manager.

use std::path::Path;
use std::sync::Arc;

use ormforge_core::{
    application::{ApplicationError, ports::PackageManager, ports::ProcessRunner},
    domain::{DependencyKind, InstallScope, PackageId},
    error::ForgeResult,
};
use tracing::{debug, info, instrument, warn};

use crate::process::command_line;

const NPM: &str = "npm";

/// Characters npm draws the dependency tree with, on every platform.
const TREE_GLYPHS: &[char] = &['├', '└', '│', '─', '┬', '+', '`', '|', '-', ' '];

/// Looks packages up with `npm list` and installs them with `npm install`.
pub struct NpmPackageManager {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl NpmPackageManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self::with_program(runner, NPM)
    }

    /// Use a different executable, e.g. `npm.cmd` or an absolute path.
    pub fn with_program(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn list_args(scope: InstallScope) -> Vec<&'static str> {
        let mut args = vec!["list", "--depth=0"];
        if scope == InstallScope::Global {
            args.push("-g");
        }
        args
    }

    fn install_args<'a>(
        package: &'a PackageId,
        scope: InstallScope,
        kind: DependencyKind,
    ) -> Vec<&'a str> {
        let mut args = vec!["install", package.as_str()];
        if kind == DependencyKind::Development {
            args.push("-D");
        }
        if scope == InstallScope::Global {
            args.push("-g");
        }
        args
    }
}

impl PackageManager for NpmPackageManager {
    #[instrument(skip_all, fields(package = %package, scope = ?scope))]
    fn installed_version(
        &self,
        package: &PackageId,
        workspace: &Path,
        scope: InstallScope,
    ) -> ForgeResult<Option<String>> {
        let output = self
            .runner
            .run(&self.program, &Self::list_args(scope), workspace)?;

        // npm exits non-zero when the tree has problems but still prints it.
        if !output.success {
            debug!(code = ?output.code, "npm list reported problems");
        }

        let version = parse_list_version(&output.stdout, package.as_str());
        debug!(?version, "lookup finished");
        Ok(version)
    }

    #[instrument(skip_all, fields(package = %package, scope = ?scope, kind = ?kind))]
    fn install(
        &self,
        package: &PackageId,
        workspace: &Path,
        scope: InstallScope,
        kind: DependencyKind,
    ) -> ForgeResult<()> {
        let args = Self::install_args(package, scope, kind);
        info!(command = %command_line(&self.program, &args), "running");

        let output = self.runner.run(&self.program, &args, workspace)?;
        if output.success {
            return Ok(());
        }

        let reason = output
            .stderr
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| match output.code {
                Some(code) => format!("npm exited with status {code}"),
                None => "npm was terminated by a signal".to_string(),
            });
        warn!(%reason, "install failed");

        Err(ApplicationError::InstallError {
            package: package.to_string(),
            reason,
        }
        .into())
    }
}

/// Version of `name` in `npm list --depth=0` output.
///
/// Only dependency lines are considered; the root project line is not. A
/// trailing `invalid` or `extraneous` marker does not hide the version.
pub fn parse_list_version(listing: &str, name: &str) -> Option<String> {
    listing.lines().find_map(|line| {
        let entry = line.trim_start_matches(TREE_GLYPHS);
        if entry.len() == line.len() {
            return None;
        }

        let token = entry.split_whitespace().next()?;
        let (found, version) = token.rsplit_once('@')?;
        if found != name {
            return None;
        }

        let version = version.replace("\"invalid\"", "");
        let version = version.trim();
        (!version.is_empty()).then(|| version.to_string())
    })
}
