//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ormforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{
    DependencyKind, InstallScope, ModelDeclaration, PackageId, PackageRequirement, Paths,
    PropertyType, RepositoryDeclaration, Schema,
};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ormforge_adapters::filesystem::LocalFilesystem` (production)
/// - `ormforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> ForgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Write content only when nothing exists at `path`.
    ///
    /// Returns `true` when the file was created. The default probes then
    /// writes; adapters that can create exclusively should override it.
    fn write_if_absent(&self, path: &Path, content: &str) -> ForgeResult<bool> {
        if self.exists(path) {
            return Ok(false);
        }
        self.write_file(path, content)?;
        Ok(true)
    }
}

/// Port for the persisted configuration document of a workspace.
pub trait SchemaStore: Send + Sync {
    /// Where the document lives for `workspace`.
    fn location(&self, workspace: &Path) -> PathBuf;

    /// Read the document; `None` when the workspace has none yet.
    fn load(&self, workspace: &Path) -> ForgeResult<Option<Schema>>;

    /// Replace the document with `schema`.
    fn save(&self, workspace: &Path, schema: &Schema) -> ForgeResult<()>;
}

/// Captured result of an external program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Port for running external programs to completion.
pub trait ProcessRunner: Send + Sync {
    /// Run `program` in `cwd` and wait for it.
    ///
    /// A non-zero exit is reported through [`ProcessOutput::success`], not as
    /// an error; errors mean the program could not be run at all.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> ForgeResult<ProcessOutput>;
}

/// Port for the host ecosystem's package manager.
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager: Send + Sync {
    /// Installed version of `package`, if any, in the given scope.
    fn installed_version(
        &self,
        package: &PackageId,
        workspace: &Path,
        scope: InstallScope,
    ) -> ForgeResult<Option<String>>;

    /// Install `package` into the given scope.
    fn install(
        &self,
        package: &PackageId,
        workspace: &Path,
        scope: InstallScope,
        kind: DependencyKind,
    ) -> ForgeResult<()>;
}

/// Maps semantic property types to target-language type names.
pub trait TypeMapper: Send + Sync {
    fn map_type(&self, property_type: &PropertyType) -> String;
}

/// A file a fresh workspace starts with, owned by the user once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineFile {
    /// Path relative to the workspace root.
    pub path: PathBuf,
    pub content: String,
}

/// Everything language-specific about the generated project.
///
/// Implemented by `ormforge_adapters::language::TypeScriptBackend`.
pub trait LanguageBackend: TypeMapper {
    /// Language name, e.g. `typescript`.
    fn name(&self) -> &str;

    /// Source file extension without the dot.
    fn extension(&self) -> &str;

    /// Render the machine-owned model artifact.
    fn render_model(&self, model: &ModelDeclaration) -> String;

    /// Render one repository skeleton.
    fn render_repository(&self, repository: &RepositoryDeclaration) -> String;

    /// Files written once when a workspace is provisioned.
    fn baseline_files(&self, paths: &Paths) -> Vec<BaselineFile>;

    /// Packages every generated workspace needs regardless of dialect.
    fn toolchain_packages(&self) -> Vec<PackageRequirement>;
}
