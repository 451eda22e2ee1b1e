//! Idempotent installation of driver and toolchain packages.
//!
//! Every package is looked up before it is installed, so running the same
//! step twice installs nothing the second time. Packages are handled one at
//! a time; the first failure stops the batch and nothing already installed
//! is rolled back.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{LanguageBackend, PackageManager},
    domain::{
        DependencyKind, DomainValidator, InstallScope, PackageId, PackageRequirement, Schema,
        required_packages,
    },
    error::ForgeResult,
};

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled { version: String },
    Installed,
}

impl InstallOutcome {
    pub fn was_installed(&self) -> bool {
        matches!(self, Self::Installed)
    }
}

pub struct PackageInstaller {
    packages: Arc<dyn PackageManager>,
}

impl PackageInstaller {
    pub fn new(packages: Arc<dyn PackageManager>) -> Self {
        Self { packages }
    }

    /// Install `requirement` unless the manifest already lists it.
    #[instrument(skip(self, workspace), fields(package = %requirement.id))]
    pub fn ensure_installed(
        &self,
        requirement: &PackageRequirement,
        workspace: &Path,
        scope: InstallScope,
    ) -> ForgeResult<InstallOutcome> {
        if let Some(version) = self
            .packages
            .installed_version(&requirement.id, workspace, scope)?
        {
            debug!(%version, "already installed");
            return Ok(InstallOutcome::AlreadyInstalled { version });
        }

        info!("installing");
        self.packages
            .install(&requirement.id, workspace, scope, requirement.kind)?;
        Ok(InstallOutcome::Installed)
    }

    /// Driver packages for every data source, deduplicated across sources.
    ///
    /// Fails with `MissingConnection` before installing anything when a
    /// server-class source has no connection.
    #[instrument(skip_all, fields(workspace = %workspace.display()))]
    pub fn install_dialects(
        &self,
        workspace: &Path,
        schema: &Schema,
    ) -> ForgeResult<Vec<(PackageId, InstallOutcome)>> {
        let mut wanted: Vec<PackageId> = Vec::new();
        for source in &schema.sources {
            let dialect = DomainValidator::validate_source(source)?;
            for package in required_packages(dialect) {
                if !wanted.contains(&package) {
                    wanted.push(package);
                }
            }
        }

        self.install_all(
            workspace,
            wanted.into_iter().map(|id| PackageRequirement {
                id,
                kind: DependencyKind::Runtime,
            }),
        )
    }

    /// Toolchain packages of the language backend.
    #[instrument(skip_all, fields(language = backend.name()))]
    pub fn install_toolchain(
        &self,
        workspace: &Path,
        backend: &dyn LanguageBackend,
    ) -> ForgeResult<Vec<(PackageId, InstallOutcome)>> {
        self.install_all(workspace, backend.toolchain_packages())
    }

    fn install_all(
        &self,
        workspace: &Path,
        requirements: impl IntoIterator<Item = PackageRequirement>,
    ) -> ForgeResult<Vec<(PackageId, InstallOutcome)>> {
        let mut outcomes = Vec::new();
        for requirement in requirements {
            let outcome = self.ensure_installed(&requirement, workspace, InstallScope::Local)?;
            outcomes.push((requirement.id, outcome));
        }
        Ok(outcomes)
    }
}
