//! Repository skeletons, one per concrete entity.
//!
//! Skeletons are user-owned as soon as they exist: a file that is already
//! there is never rewritten.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{Filesystem, LanguageBackend},
        services::{model_generator::model_dir, structure_provisioner::WriteReport},
    },
    domain::{Entity, RepositoryDeclaration, Schema, SchemaIndex, singular_of},
    error::ForgeResult,
};

pub struct RepositoryGenerator {
    filesystem: Arc<dyn Filesystem>,
}

impl RepositoryGenerator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    pub fn declare(entity: &Entity) -> RepositoryDeclaration {
        RepositoryDeclaration {
            type_name: singular_of(entity),
            entity_name: entity.name.clone(),
        }
    }

    /// Write `<src>/<model>/repository<Singular>.<ext>` for every concrete
    /// entity that does not have one yet.
    #[instrument(skip_all, fields(workspace = %workspace.display(), language = backend.name()))]
    pub fn generate(
        &self,
        workspace: &Path,
        schema: &Schema,
        backend: &dyn LanguageBackend,
    ) -> ForgeResult<WriteReport> {
        SchemaIndex::build(schema)?;

        let dir = model_dir(workspace, schema);
        self.filesystem.create_dir_all(&dir)?;

        let mut report = WriteReport::default();
        for entity in schema.concrete_entities() {
            let declaration = Self::declare(entity);
            let path = dir.join(format!(
                "repository{}.{}",
                declaration.type_name,
                backend.extension()
            ));

            let created = self
                .filesystem
                .write_if_absent(&path, &backend.render_repository(&declaration))?;
            if created {
                info!(path = %path.display(), "repository created");
            } else {
                debug!(path = %path.display(), "repository exists, kept");
            }
            report.record(path, created);
        }

        Ok(report)
    }
}
