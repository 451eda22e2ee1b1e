//! Workspace directory layout and baseline files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, LanguageBackend},
    domain::Schema,
    error::ForgeResult,
};

/// Paths touched by a write-once step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub created: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
}

impl WriteReport {
    pub fn record(&mut self, path: PathBuf, created: bool) {
        if created {
            self.created.push(path);
        } else {
            self.kept.push(path);
        }
    }

    pub fn extend(&mut self, other: WriteReport) {
        self.created.extend(other.created);
        self.kept.extend(other.kept);
    }
}

pub struct StructureProvisioner {
    filesystem: Arc<dyn Filesystem>,
}

impl StructureProvisioner {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Create the source and data directories and any missing baseline file.
    ///
    /// Existing files are never touched.
    #[instrument(skip_all, fields(workspace = %workspace.display(), language = backend.name()))]
    pub fn provision(
        &self,
        workspace: &Path,
        schema: &Schema,
        backend: &dyn LanguageBackend,
    ) -> ForgeResult<WriteReport> {
        self.filesystem
            .create_dir_all(&workspace.join(schema.paths.src()))?;
        self.filesystem
            .create_dir_all(&workspace.join(schema.paths.data()))?;

        let mut report = WriteReport::default();
        for file in backend.baseline_files(&schema.paths) {
            let path = workspace.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            let created = self.filesystem.write_if_absent(&path, &file.content)?;
            if created {
                info!(path = %path.display(), "created");
            } else {
                debug!(path = %path.display(), "kept existing file");
            }
            report.record(path, created);
        }

        Ok(report)
    }
}
