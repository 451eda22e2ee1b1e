//! YAML configuration document stored at the workspace root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ormforge_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, SchemaStore},
    },
    domain::Schema,
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// File name of the configuration document.
pub const CONFIG_FILE_NAME: &str = "ormforge.yaml";

/// Reads and writes `ormforge.yaml` through a [`Filesystem`].
///
/// Sections the schema model does not know about are carried through a
/// load/save cycle unchanged.
pub struct YamlSchemaStore {
    filesystem: Arc<dyn Filesystem>,
}

impl YamlSchemaStore {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    pub fn parse(path: &Path, content: &str) -> ForgeResult<Schema> {
        if content.trim().is_empty() {
            return Ok(Schema::default());
        }
        serde_yaml_ng::from_str(content).map_err(|e| {
            ApplicationError::SchemaDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn render(path: &Path, schema: &Schema) -> ForgeResult<String> {
        serde_yaml_ng::to_string(schema).map_err(|e| {
            ApplicationError::SchemaDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl SchemaStore for YamlSchemaStore {
    fn location(&self, workspace: &Path) -> PathBuf {
        workspace.join(CONFIG_FILE_NAME)
    }

    #[instrument(skip_all, fields(workspace = %workspace.display()))]
    fn load(&self, workspace: &Path) -> ForgeResult<Option<Schema>> {
        let path = self.location(workspace);
        if !self.filesystem.exists(&path) {
            debug!("no configuration document");
            return Ok(None);
        }

        let content = self.filesystem.read_file(&path)?;
        Self::parse(&path, &content).map(Some)
    }

    #[instrument(skip_all, fields(workspace = %workspace.display()))]
    fn save(&self, workspace: &Path, schema: &Schema) -> ForgeResult<()> {
        let path = self.location(workspace);
        let content = Self::render(&path, schema)?;
        self.filesystem.write_file(&path, &content)?;
        debug!(path = %path.display(), "configuration written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use ormforge_core::domain::{Cardinality, EnumLiteral, PropertyType};
    use ormforge_core::error::ForgeError;

    const DOCUMENT: &str = r#"
entities:
  - name: Products
    primaryKey: [id]
    properties:
      - name: id
        type: integer
        required: true
        autoIncrement: true
      - name: name
        type: string
        length: 40
    relations:
      - name: category
        type: oneToMany
        entity: Categories
        from: categoryId
        to: id
  - name: Categories
    properties:
      - name: id
        type: integer
enums:
  - name: Status
    values:
      - name: Open
        value: 1
      - name: Closed
        value: closed
sources:
  - name: main
    dialect: PostgreSQL
    connection: $CNN_POSTGRES
stages:
  - name: default
    sources:
      - name: main
"#;

    #[test]
    fn parses_runtime_document() {
        let schema = YamlSchemaStore::parse(Path::new("ormforge.yaml"), DOCUMENT).unwrap();

        let products = schema.entity("Products").unwrap();
        assert_eq!(products.properties[0].property_type(), PropertyType::Integer);
        assert!(products.properties[0].required);
        assert_eq!(products.relations[0].cardinality, Cardinality::OneToMany);
        assert_eq!(products.relations[0].target, "Categories");
        assert_eq!(schema.enums[0].values[0].value, EnumLiteral::from(1));
        assert_eq!(schema.sources[0].connection.as_deref(), Some("$CNN_POSTGRES"));
    }

    #[test]
    fn unknown_sections_survive_a_save() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/ws")).unwrap();
        fs.write_file(Path::new("/ws/ormforge.yaml"), DOCUMENT).unwrap();

        let store = YamlSchemaStore::new(Arc::new(fs.clone()));
        let schema = store.load(Path::new("/ws")).unwrap().unwrap();
        store.save(Path::new("/ws"), &schema).unwrap();

        let written = fs.contents("/ws/ormforge.yaml").unwrap();
        assert!(written.contains("stages:"));
        assert!(written.contains("primaryKey:"));
        assert!(written.contains("autoIncrement: true"));
        assert!(written.contains("from: categoryId"));

        let reloaded = store.load(Path::new("/ws")).unwrap().unwrap();
        assert_eq!(reloaded, schema);
    }

    #[test]
    fn save_keeps_authored_spelling_and_section_order() {
        let document = "\
entities:
  - name: Notes
    properties:
      - name: body
        type: text
      - name: done
        type: bool
      - name: tag
stages:
  - name: default
app:
  src: src
";
        let path = Path::new("ormforge.yaml");
        let schema = YamlSchemaStore::parse(path, document).unwrap();
        let notes = schema.entity("Notes").unwrap();
        assert_eq!(notes.properties[0].property_type(), PropertyType::Text);
        assert_eq!(notes.properties[1].property_type(), PropertyType::Boolean);
        assert_eq!(notes.properties[2].property_type(), PropertyType::Text);

        let written = YamlSchemaStore::render(path, &schema).unwrap();

        assert!(written.contains("type: text"));
        assert!(written.contains("type: bool"));
        assert!(!written.contains("type: string"));
        assert!(!written.contains("type: boolean"));
        let stages = written.find("stages:").unwrap();
        let app = written.find("app:").unwrap();
        assert!(stages < app);
    }

    #[test]
    fn missing_document_loads_as_none() {
        let store = YamlSchemaStore::new(Arc::new(MemoryFilesystem::new()));
        assert_eq!(store.load(Path::new("/ws")).unwrap(), None);
    }

    #[test]
    fn empty_document_is_an_empty_schema() {
        let schema = YamlSchemaStore::parse(Path::new("ormforge.yaml"), "  \n").unwrap();
        assert_eq!(schema, Schema::default());
    }

    #[test]
    fn malformed_document_is_reported_with_its_path() {
        let err = YamlSchemaStore::parse(Path::new("/ws/ormforge.yaml"), "entities: [").unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::SchemaDocument { ref path, .. })
                if path == Path::new("/ws/ormforge.yaml")
        ));
    }
}
