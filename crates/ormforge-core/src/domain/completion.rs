//! Schema completion.
//!
//! Takes whatever the author wrote, plus whatever is already persisted, plus
//! command-line overrides, and returns a schema with every default filled.
//! Concrete values are never discarded: the existing document wins over the
//! partial one, and both win over overrides.

use tracing::{debug, warn};

use crate::domain::{
    entities::schema::{
        DEFAULT_DATA_DIR, DEFAULT_MODEL_DIR, DEFAULT_SRC_DIR, DataSource, EnumDef, Entity, Extra,
        Paths, Schema,
    },
    error::DomainError,
    value_objects::Dialect,
};

/// Command-line overrides for the primary data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub source: Option<String>,
    pub dialect: Option<String>,
    pub connection: Option<String>,
}

impl Overrides {
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    pub fn connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }
}

/// Values used when neither the document nor the overrides supply one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionDefaults {
    pub dialect: Dialect,
}

impl Default for CompletionDefaults {
    fn default() -> Self {
        Self {
            dialect: Dialect::SqlJs,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchemaCompleter {
    defaults: CompletionDefaults,
}

impl SchemaCompleter {
    pub fn new(defaults: CompletionDefaults) -> Self {
        Self { defaults }
    }

    /// Produce the completed schema.
    ///
    /// `workspace_name` names the synthesized data source when neither the
    /// document nor the overrides provide one.
    pub fn complete(
        &self,
        existing: Option<&Schema>,
        partial: &Schema,
        overrides: &Overrides,
        workspace_name: &str,
    ) -> Result<Schema, DomainError> {
        let override_dialect = overrides
            .dialect
            .as_deref()
            .map(str::parse::<Dialect>)
            .transpose()?;

        let mut schema = match existing {
            Some(existing) => merge(existing, partial),
            None => partial.clone(),
        };

        let target = target_source(&mut schema, overrides, workspace_name);
        let data_dir = schema.paths.data().to_string();

        {
            let source = &mut schema.sources[target];
            apply_dialect_override(source, override_dialect);
            apply_connection_override(source, overrides.connection.as_deref());
        }

        for source in &mut schema.sources {
            let dialect = match source.parsed_dialect()? {
                Some(dialect) => dialect,
                None => self.defaults.dialect,
            };
            source.dialect = Some(dialect.as_str().to_string());

            if source.connection.is_none() {
                source.connection = dialect.default_connection(&source.name, &data_dir);
            }
        }

        fill_paths(&mut schema.paths);

        debug!(
            entities = schema.entities.len(),
            enums = schema.enums.len(),
            sources = schema.sources.len(),
            "schema completed"
        );
        Ok(schema)
    }
}

/// Index of the source overrides apply to, creating it when needed.
fn target_source(schema: &mut Schema, overrides: &Overrides, workspace_name: &str) -> usize {
    if let Some(name) = overrides.source.as_deref() {
        if let Some(index) = schema.sources.iter().position(|s| s.name == name) {
            return index;
        }
        schema.sources.push(DataSource::new(name));
        return schema.sources.len() - 1;
    }

    if schema.sources.is_empty() {
        schema.sources.push(DataSource::new(workspace_name));
    }
    0
}

fn apply_dialect_override(source: &mut DataSource, dialect: Option<Dialect>) {
    let Some(dialect) = dialect else {
        return;
    };
    match source.parsed_dialect() {
        Ok(Some(current)) if current != dialect => warn!(
            source = %source.name,
            current = %current,
            ignored = %dialect,
            "dialect override ignored, source already has one"
        ),
        Ok(Some(_)) => {}
        // Unparseable values are reported by the normalization pass.
        Err(_) => {}
        Ok(None) => source.dialect = Some(dialect.as_str().to_string()),
    }
}

fn apply_connection_override(source: &mut DataSource, connection: Option<&str>) {
    let Some(connection) = connection else {
        return;
    };
    match source.connection.as_deref() {
        None => source.connection = Some(connection.to_string()),
        Some(current) if current != connection => warn!(
            source = %source.name,
            "connection override ignored, source already has one"
        ),
        Some(_) => {}
    }
}

fn fill_paths(paths: &mut Paths) {
    paths.src.get_or_insert_with(|| DEFAULT_SRC_DIR.to_string());
    paths.data.get_or_insert_with(|| DEFAULT_DATA_DIR.to_string());
    paths.model.get_or_insert_with(|| DEFAULT_MODEL_DIR.to_string());
}

/// Additive merge: `existing` wins field by field, `partial` fills gaps.
fn merge(existing: &Schema, partial: &Schema) -> Schema {
    Schema {
        paths: Paths {
            src: existing.paths.src.clone().or_else(|| partial.paths.src.clone()),
            data: existing.paths.data.clone().or_else(|| partial.paths.data.clone()),
            model: existing.paths.model.clone().or_else(|| partial.paths.model.clone()),
        },
        entities: union_by_name(&existing.entities, &partial.entities, |e| &e.name, merge_entity),
        enums: union_by_name(&existing.enums, &partial.enums, |e| &e.name, merge_enum),
        sources: union_by_name(&existing.sources, &partial.sources, |s| &s.name, merge_source),
        extra: merge_extra(&existing.extra, &partial.extra),
    }
}

fn union_by_name<T: Clone>(
    existing: &[T],
    partial: &[T],
    name: impl Fn(&T) -> &String,
    combine: impl Fn(&T, &T) -> T,
) -> Vec<T> {
    let mut merged: Vec<T> = existing
        .iter()
        .map(|item| match partial.iter().find(|p| name(p) == name(item)) {
            Some(other) => combine(item, other),
            None => item.clone(),
        })
        .collect();

    for item in partial {
        if !existing.iter().any(|e| name(e) == name(item)) {
            merged.push(item.clone());
        }
    }
    merged
}

fn merge_entity(existing: &Entity, partial: &Entity) -> Entity {
    Entity {
        name: existing.name.clone(),
        singular: existing.singular.clone().or_else(|| partial.singular.clone()),
        is_abstract: existing.is_abstract || partial.is_abstract,
        extends: existing.extends.clone().or_else(|| partial.extends.clone()),
        properties: union_by_name(&existing.properties, &partial.properties, |p| &p.name, |e, _| e.clone()),
        relations: union_by_name(&existing.relations, &partial.relations, |r| &r.name, |e, _| e.clone()),
        extra: merge_extra(&existing.extra, &partial.extra),
    }
}

fn merge_enum(existing: &EnumDef, partial: &EnumDef) -> EnumDef {
    EnumDef {
        name: existing.name.clone(),
        values: union_by_name(&existing.values, &partial.values, |m| &m.name, |e, _| e.clone()),
    }
}

fn merge_source(existing: &DataSource, partial: &DataSource) -> DataSource {
    DataSource {
        name: existing.name.clone(),
        dialect: existing.dialect.clone().or_else(|| partial.dialect.clone()),
        connection: existing.connection.clone().or_else(|| partial.connection.clone()),
        extra: merge_extra(&existing.extra, &partial.extra),
    }
}

fn merge_extra(existing: &Extra, partial: &Extra) -> Extra {
    let mut merged = existing.clone();
    for (key, value) in partial {
        merged.entry(key.clone()).or_insert_with(|| value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::schema::{Property, Relation},
        value_objects::Cardinality,
    };

    fn completer() -> SchemaCompleter {
        SchemaCompleter::default()
    }

    fn catalog() -> Schema {
        Schema::default()
            .with_entity(
                Entity::new("Categories")
                    .with_property(Property::new("id", "integer").required())
                    .with_relation(Relation::new("products", Cardinality::ManyToOne, "Products")),
            )
            .with_entity(
                Entity::new("Products")
                    .with_property(Property::new("id", "integer").required())
                    .with_property(Property::new("name", "string")),
            )
    }

    #[test]
    fn synthesizes_source_from_workspace_name() {
        let schema = completer()
            .complete(None, &Schema::default(), &Overrides::default(), "shop")
            .unwrap();

        assert_eq!(schema.sources.len(), 1);
        let source = &schema.sources[0];
        assert_eq!(source.name, "shop");
        assert_eq!(source.dialect.as_deref(), Some("SQLjs"));
        assert_eq!(source.connection.as_deref(), Some("data/shop.db"));
        assert_eq!(schema.paths.src.as_deref(), Some("src"));
        assert_eq!(schema.paths.data.as_deref(), Some("data"));
        assert_eq!(schema.paths.model.as_deref(), Some("model"));
    }

    #[test]
    fn source_override_names_synthesized_source() {
        let overrides = Overrides::default().source("main").dialect("postgres");
        let schema = completer()
            .complete(None, &Schema::default(), &overrides, "shop")
            .unwrap();

        let source = &schema.sources[0];
        assert_eq!(source.name, "main");
        assert_eq!(source.dialect.as_deref(), Some("PostgreSQL"));
        assert_eq!(source.connection, None);
    }

    #[test]
    fn source_override_appends_unknown_source() {
        let partial = Schema::default().with_source(DataSource::new("main").dialect("mysql"));
        let overrides = Overrides::default().source("reports").dialect("sqljs");
        let schema = completer().complete(None, &partial, &overrides, "shop").unwrap();

        let names: Vec<&str> = schema.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["main", "reports"]);
        assert_eq!(schema.sources[0].dialect.as_deref(), Some("MySQL"));
        assert_eq!(schema.sources[1].connection.as_deref(), Some("data/reports.db"));
    }

    #[test]
    fn unsupported_dialect_is_rejected() {
        let overrides = Overrides::default().dialect("foo");
        let err = completer()
            .complete(None, &Schema::default(), &overrides, "shop")
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedDialect {
                dialect: "foo".into()
            }
        );
    }

    #[test]
    fn unsupported_dialect_in_document_is_rejected() {
        let partial = Schema::default().with_source(DataSource::new("main").dialect("db2"));
        assert!(matches!(
            completer().complete(None, &partial, &Overrides::default(), "shop"),
            Err(DomainError::UnsupportedDialect { .. })
        ));
    }

    #[test]
    fn overrides_never_replace_existing_values() {
        let existing = Schema::default()
            .with_source(DataSource::new("main").dialect("MySQL").connection("mysql://db"));
        let overrides = Overrides::default().dialect("pg").connection("postgres://other");

        let schema = completer()
            .complete(Some(&existing), &Schema::default(), &overrides, "shop")
            .unwrap();

        assert_eq!(schema.sources[0].dialect.as_deref(), Some("MySQL"));
        assert_eq!(schema.sources[0].connection.as_deref(), Some("mysql://db"));
    }

    #[test]
    fn existing_values_win_over_partial() {
        let mut existing = catalog();
        existing.paths.src = Some("app".into());
        let mut partial = Schema::default()
            .with_entity(Entity::new("Products").singular("Item"))
            .with_entity(Entity::new("Orders"));
        partial.paths.src = Some("lib".into());
        partial.paths.data = Some("db".into());

        let schema = completer()
            .complete(Some(&existing), &partial, &Overrides::default(), "shop")
            .unwrap();

        assert_eq!(schema.paths.src.as_deref(), Some("app"));
        assert_eq!(schema.paths.data.as_deref(), Some("db"));
        let names: Vec<&str> = schema.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Categories", "Products", "Orders"]);
        let products = schema.entity("Products").unwrap();
        assert_eq!(products.singular.as_deref(), Some("Item"));
        assert_eq!(products.properties.len(), 2);
    }

    #[test]
    fn unknown_sections_survive() {
        let mut existing = Schema::default();
        existing
            .extra
            .insert("stages".into(), serde_json::json!([{ "name": "default" }]));

        let schema = completer()
            .complete(Some(&existing), &Schema::default(), &Overrides::default(), "shop")
            .unwrap();
        assert!(schema.extra.contains_key("stages"));
    }

    #[test]
    fn completion_is_idempotent() {
        let overrides = Overrides::default().source("main").dialect("postgresql").connection("pg://x");
        let once = completer().complete(None, &catalog(), &overrides, "shop").unwrap();
        let twice = completer()
            .complete(None, &once, &Overrides::default(), "shop")
            .unwrap();
        assert_eq!(once, twice);

        let again = completer().complete(Some(&once), &once, &overrides, "shop").unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn configured_default_dialect_applies() {
        let completer = SchemaCompleter::new(CompletionDefaults {
            dialect: Dialect::MongoDb,
        });
        let schema = completer
            .complete(None, &Schema::default(), &Overrides::default(), "shop")
            .unwrap();
        assert_eq!(schema.sources[0].dialect.as_deref(), Some("MongoDB"));
        assert_eq!(schema.sources[0].connection, None);
    }
}
