//! Generation of the machine-owned model artifact.
//!
//! Two stages: [`ModelGenerator::declare`] turns a validated schema into a
//! [`ModelDeclaration`], and the language backend prints it. Nothing is
//! written unless the whole schema resolves.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::ports::{Filesystem, LanguageBackend, TypeMapper},
    domain::{
        EnumDeclaration, FieldDeclaration, FieldType, ModelDeclaration, ProjectionDeclaration,
        ProjectionField, ProjectionType, QueryableRoot, Schema, SchemaIndex, TypeDeclaration,
        singular_of,
    },
    error::ForgeResult,
};

/// File name of the model artifact, before the extension.
pub const MODEL_FILE_STEM: &str = "model";

/// `<workspace>/<src>/<model>`
pub fn model_dir(workspace: &Path, schema: &Schema) -> PathBuf {
    workspace
        .join(schema.paths.src())
        .join(schema.paths.model())
}

pub struct ModelGenerator {
    filesystem: Arc<dyn Filesystem>,
}

impl ModelGenerator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Build the declaration model. Pure; fails on any unresolved name.
    pub fn declare<M: TypeMapper + ?Sized>(
        schema: &Schema,
        mapper: &M,
    ) -> ForgeResult<ModelDeclaration> {
        let index = SchemaIndex::build(schema)?;

        let enums = schema
            .enums
            .iter()
            .map(|e| EnumDeclaration {
                name: e.name.clone(),
                members: e
                    .values
                    .iter()
                    .map(|m| (m.name.clone(), m.value.clone()))
                    .collect(),
            })
            .collect();

        let mut types = Vec::with_capacity(schema.entities.len());
        for entity in &schema.entities {
            let name = singular_of(entity);
            let parent = index.parent_of(entity)?.map(singular_of);

            let mut fields = Vec::new();
            let mut projected = Vec::new();

            for property in &entity.properties {
                let type_name = match &property.enum_name {
                    Some(enum_name) => enum_name.clone(),
                    None => mapper.map_type(&property.property_type()),
                };
                fields.push(FieldDeclaration {
                    name: property.name.clone(),
                    field_type: FieldType::Scalar(type_name.clone()),
                    optional: true,
                });
                projected.push(ProjectionField {
                    name: property.name.clone(),
                    field_type: ProjectionType::Scalar(type_name),
                });
            }

            for relation in &entity.relations {
                let target = singular_of(index.target_of(entity, relation)?);
                let field_type = if relation.cardinality.is_collection() {
                    FieldType::Collection(target.clone())
                } else {
                    FieldType::Reference(target.clone())
                };
                fields.push(FieldDeclaration {
                    name: relation.name.clone(),
                    optional: !relation.cardinality.is_collection(),
                    field_type,
                });
                projected.push(ProjectionField {
                    name: relation.name.clone(),
                    field_type: ProjectionType::Relation {
                        cardinality: relation.cardinality,
                        target,
                    },
                });
            }

            types.push(TypeDeclaration {
                projection: ProjectionDeclaration {
                    of: name.clone(),
                    parent: parent.clone(),
                    fields: projected,
                },
                name,
                is_abstract: entity.is_abstract,
                parent,
                fields,
            });
        }

        let roots = schema
            .concrete_entities()
            .map(|entity| QueryableRoot {
                name: entity.name.clone(),
                projection_of: singular_of(entity),
            })
            .collect();

        Ok(ModelDeclaration {
            enums,
            types,
            roots,
        })
    }

    /// Render and write `<src>/<model>/model.<ext>`, replacing any previous one.
    #[instrument(skip_all, fields(workspace = %workspace.display(), language = backend.name()))]
    pub fn generate(
        &self,
        workspace: &Path,
        schema: &Schema,
        backend: &dyn LanguageBackend,
    ) -> ForgeResult<PathBuf> {
        let declaration = Self::declare(schema, backend)?;
        let content = backend.render_model(&declaration);

        let dir = model_dir(workspace, schema);
        self.filesystem.create_dir_all(&dir)?;
        let path = dir.join(format!("{}.{}", MODEL_FILE_STEM, backend.extension()));
        self.filesystem.write_file(&path, &content)?;

        info!(
            path = %path.display(),
            types = declaration.types.len(),
            enums = declaration.enums.len(),
            "model generated"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Cardinality, DomainError, Entity, EnumDef, EnumLiteral, Property, PropertyType, Relation,
    };
    use crate::error::ForgeError;

    struct Identity;

    impl TypeMapper for Identity {
        fn map_type(&self, property_type: &PropertyType) -> String {
            property_type.to_string()
        }
    }

    #[test]
    fn sole_concrete_entity_declares_one_type_and_root() {
        let schema = Schema::default().with_entity(
            Entity::new("Products")
                .with_property(Property::new("id", "integer"))
                .with_property(Property::new("name", "text")),
        );

        let model = ModelGenerator::declare(&schema, &Identity).unwrap();

        assert_eq!(model.types.len(), 1);
        let product = &model.types[0];
        assert_eq!(product.name, "Product");
        assert_eq!(product.projection.of, "Product");
        assert_eq!(
            product.fields[0],
            FieldDeclaration {
                name: "id".into(),
                field_type: FieldType::Scalar("integer".into()),
                optional: true,
            }
        );
        assert_eq!(
            model.roots,
            vec![QueryableRoot {
                name: "Products".into(),
                projection_of: "Product".into(),
            }]
        );
    }

    #[test]
    fn many_to_one_is_an_initialized_collection() {
        let schema = Schema::default()
            .with_entity(
                Entity::new("Categories")
                    .with_property(Property::new("id", "integer"))
                    .with_relation(Relation::new("products", Cardinality::ManyToOne, "Products")),
            )
            .with_entity(
                Entity::new("Products")
                    .with_property(Property::new("id", "integer"))
                    .with_relation(Relation::new("category", Cardinality::OneToMany, "Categories")),
            );

        let model = ModelGenerator::declare(&schema, &Identity).unwrap();

        let category = model.type_named("Category").unwrap();
        let collections: Vec<&str> = category.collections().map(|f| f.name.as_str()).collect();
        assert_eq!(collections, vec!["products"]);
        assert_eq!(
            category.field("products").unwrap().field_type,
            FieldType::Collection("Product".into())
        );

        let product = model.type_named("Product").unwrap();
        assert_eq!(product.collections().count(), 0);
        let reference = product.field("category").unwrap();
        assert_eq!(reference.field_type, FieldType::Reference("Category".into()));
        assert!(reference.optional);
        assert_eq!(
            product.projection.fields[1].field_type,
            ProjectionType::Relation {
                cardinality: Cardinality::OneToMany,
                target: "Category".into(),
            }
        );
    }

    #[test]
    fn abstract_parent_gets_no_root() {
        let schema = Schema::default()
            .with_entity(Entity::new("Bases").singular("Base").abstract_entity())
            .with_entity(Entity::new("Customers").extends("Bases"));

        let model = ModelGenerator::declare(&schema, &Identity).unwrap();

        assert!(model.types[0].is_abstract);
        assert_eq!(model.types[1].parent.as_deref(), Some("Base"));
        assert_eq!(model.types[1].projection.parent.as_deref(), Some("Base"));
        assert_eq!(model.roots.len(), 1);
        assert_eq!(model.roots[0].name, "Customers");
    }

    #[test]
    fn enum_properties_use_the_enum_name() {
        let schema = Schema::default()
            .with_enum(EnumDef::new("Status").member("Open", 1).member("Closed", "closed"))
            .with_entity(
                Entity::new("Orders").with_property(Property::new("status", "integer").of_enum("Status")),
            );

        let model = ModelGenerator::declare(&schema, &Identity).unwrap();

        assert_eq!(
            model.enums[0].members,
            vec![
                ("Open".to_string(), EnumLiteral::from(1)),
                ("Closed".to_string(), EnumLiteral::from("closed")),
            ]
        );
        assert_eq!(
            model.types[0].fields[0].field_type,
            FieldType::Scalar("Status".into())
        );
    }

    #[test]
    fn dangling_relation_fails_declaration() {
        let schema = Schema::default().with_entity(
            Entity::new("Products").with_relation(Relation::new("maker", Cardinality::OneToOne, "Makers")),
        );

        let err = ModelGenerator::declare(&schema, &Identity).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::DanglingRelation { .. })
        ));
    }
}
