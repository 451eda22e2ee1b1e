//! Scaffold Service - main application orchestrator.
//!
//! This service sequences the whole workflow:
//! 1. Complete the schema (defaults, overrides, existing document)
//! 2. Persist the configuration document
//! 3. Provision the directory layout and baseline files
//! 4. Install toolchain and dialect driver packages
//! 5. Generate the model and the repository skeletons
//!
//! Each step finishes before the next starts. A failing step stops the run;
//! nothing is rolled back, and every step converges when rerun.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Filesystem, LanguageBackend, PackageManager, SchemaStore},
        services::{
            model_generator::ModelGenerator,
            package_installer::{InstallOutcome, PackageInstaller},
            repository_generator::RepositoryGenerator,
            structure_provisioner::{StructureProvisioner, WriteReport},
        },
    },
    domain::{CompletionDefaults, Overrides, PackageId, Schema, SchemaCompleter, SchemaIndex},
    error::{ForgeError, ForgeResult},
};

/// Which artifacts `build` regenerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTargets {
    pub model: bool,
    pub repositories: bool,
}

impl BuildTargets {
    pub const ALL: Self = Self {
        model: true,
        repositories: true,
    };
}

/// What a use case did to the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub workspace: PathBuf,
    /// Set when the configuration document was written.
    pub config: Option<PathBuf>,
    /// Set when the model artifact was written.
    pub model: Option<PathBuf>,
    /// Baseline files and repository skeletons.
    pub files: WriteReport,
    pub packages: Vec<(PackageId, InstallOutcome)>,
}

impl ScaffoldReport {
    fn new(workspace: &Path) -> Self {
        Self {
            workspace: workspace.to_path_buf(),
            ..Self::default()
        }
    }

    /// Packages that were actually installed during this run.
    pub fn installed(&self) -> impl Iterator<Item = &PackageId> {
        self.packages
            .iter()
            .filter(|(_, outcome)| outcome.was_installed())
            .map(|(id, _)| id)
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Arc<dyn SchemaStore>,
    filesystem: Arc<dyn Filesystem>,
    backend: Arc<dyn LanguageBackend>,
    completer: SchemaCompleter,
    provisioner: StructureProvisioner,
    installer: PackageInstaller,
    models: ModelGenerator,
    repositories: RepositoryGenerator,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use ormforge_core::application::ScaffoldService;
    /// use ormforge_core::domain::CompletionDefaults;
    ///
    /// let service = ScaffoldService::new(
    ///     store,      // Arc<dyn SchemaStore>
    ///     filesystem, // Arc<dyn Filesystem>
    ///     packages,   // Arc<dyn PackageManager>
    ///     backend,    // Arc<dyn LanguageBackend>
    ///     CompletionDefaults::default(),
    /// );
    /// ```
    pub fn new(
        store: Arc<dyn SchemaStore>,
        filesystem: Arc<dyn Filesystem>,
        packages: Arc<dyn PackageManager>,
        backend: Arc<dyn LanguageBackend>,
        defaults: CompletionDefaults,
    ) -> Self {
        Self {
            store,
            completer: SchemaCompleter::new(defaults),
            provisioner: StructureProvisioner::new(Arc::clone(&filesystem)),
            installer: PackageInstaller::new(packages),
            models: ModelGenerator::new(Arc::clone(&filesystem)),
            repositories: RepositoryGenerator::new(Arc::clone(&filesystem)),
            filesystem,
            backend,
        }
    }

    /// Create or complete a workspace.
    ///
    /// Invalid input (unsupported dialect, dangling references) fails before
    /// anything is written.
    #[instrument(skip_all, fields(workspace = %workspace.display()))]
    pub fn create(&self, workspace: &Path, overrides: &Overrides) -> ForgeResult<ScaffoldReport> {
        let existing = self.store.load(workspace)?;
        let schema = self.completer.complete(
            existing.as_ref(),
            &Schema::default(),
            overrides,
            &workspace_name(workspace),
        )?;
        SchemaIndex::build(&schema)?;

        let mut report = ScaffoldReport::new(workspace);

        self.filesystem.create_dir_all(workspace)?;
        self.store.save(workspace, &schema)?;
        report.config = Some(self.store.location(workspace));
        info!("configuration saved");

        self.provision_and_install(workspace, &schema, &mut report)?;
        self.generate(workspace, &schema, BuildTargets::ALL, &mut report)?;

        info!(
            created = report.files.created.len(),
            installed = report.installed().count(),
            "workspace ready"
        );
        Ok(report)
    }

    /// Refresh a workspace from its configuration document.
    ///
    /// With `only_model`, skips provisioning and package installation.
    #[instrument(skip_all, fields(workspace = %workspace.display(), only_model = only_model))]
    pub fn update(&self, workspace: &Path, only_model: bool) -> ForgeResult<ScaffoldReport> {
        let schema = self.load_completed(workspace)?;
        let mut report = ScaffoldReport::new(workspace);

        if !only_model {
            self.provision_and_install(workspace, &schema, &mut report)?;
        }
        self.generate(workspace, &schema, BuildTargets::ALL, &mut report)?;

        Ok(report)
    }

    /// Regenerate the requested artifacts only.
    #[instrument(skip_all, fields(workspace = %workspace.display(), targets = ?targets))]
    pub fn build(&self, workspace: &Path, targets: BuildTargets) -> ForgeResult<ScaffoldReport> {
        let schema = self.load_completed(workspace)?;
        let mut report = ScaffoldReport::new(workspace);
        self.generate(workspace, &schema, targets, &mut report)?;
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Load the document and complete it in memory, without persisting.
    fn load_completed(&self, workspace: &Path) -> ForgeResult<Schema> {
        let existing = self
            .store
            .load(workspace)?
            .ok_or_else(|| ForgeError::Configuration {
                message: format!(
                    "no configuration found at {}; run `ormforge init` first",
                    self.store.location(workspace).display()
                ),
            })?;

        let schema = self.completer.complete(
            Some(&existing),
            &Schema::default(),
            &Overrides::default(),
            &workspace_name(workspace),
        )?;
        SchemaIndex::build(&schema)?;
        Ok(schema)
    }

    fn provision_and_install(
        &self,
        workspace: &Path,
        schema: &Schema,
        report: &mut ScaffoldReport,
    ) -> ForgeResult<()> {
        let backend = self.backend.as_ref();

        report
            .files
            .extend(self.provisioner.provision(workspace, schema, backend)?);
        report
            .packages
            .extend(self.installer.install_toolchain(workspace, backend)?);
        report
            .packages
            .extend(self.installer.install_dialects(workspace, schema)?);
        Ok(())
    }

    fn generate(
        &self,
        workspace: &Path,
        schema: &Schema,
        targets: BuildTargets,
        report: &mut ScaffoldReport,
    ) -> ForgeResult<()> {
        let backend = self.backend.as_ref();

        if targets.model {
            report.model = Some(self.models.generate(workspace, schema, backend)?);
        }
        if targets.repositories {
            report
                .files
                .extend(self.repositories.generate(workspace, schema, backend)?);
        }
        Ok(())
    }
}

/// Base name of the workspace directory, used to name a synthesized source.
fn workspace_name(workspace: &Path) -> String {
    workspace
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or("main")
        .to_string()
}
