use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{Cardinality, Dialect, EnumLiteral, PropertyType},
};

/// Default source directory, relative to the workspace.
pub const DEFAULT_SRC_DIR: &str = "src";
/// Default data directory, relative to the workspace.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default model directory, relative to the source directory.
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Sections of the configuration document this tool does not own.
///
/// They are carried through load/complete/save untouched, in author order.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// The declarative schema of a workspace.
///
/// Entities, enums and sources are kept in author order; lookups are by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Paths::is_empty")]
    pub paths: Paths,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<DataSource>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Schema {
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Entities that get a queryable root and a repository.
    pub fn concrete_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.is_abstract)
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_enum(mut self, enum_def: EnumDef) -> Self {
        self.enums.push(enum_def);
        self
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.sources.push(source);
        self
    }
}

/// Workspace-relative locations of the generated project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Paths {
    pub fn src(&self) -> &str {
        self.src.as_deref().unwrap_or(DEFAULT_SRC_DIR)
    }

    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL_DIR)
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_none() && self.data.is_none() && self.model.is_none()
    }
}

/// A persisted record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,

    #[serde(default, rename = "abstract", skip_serializing_if = "is_false")]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    pub fn abstract_entity(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }
}

/// A scalar field of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,

    /// Type name as the author wrote it; see [`Property::property_type`].
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_name: String,

    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Semantic type; a missing `type` reads as text.
    pub fn property_type(&self) -> PropertyType {
        PropertyType::from(self.type_name.as_str())
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn of_enum(mut self, enum_name: impl Into<String>) -> Self {
        self.enum_name = Some(enum_name.into());
        self
    }
}

/// A named association to another entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub name: String,

    #[serde(rename = "type")]
    pub cardinality: Cardinality,

    #[serde(rename = "entity")]
    pub target: String,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Relation {
    pub fn new(name: impl Into<String>, cardinality: Cardinality, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality,
            target: target.into(),
            extra: Extra::new(),
        }
    }
}

/// An enumeration with ordered members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,

    #[serde(default)]
    pub values: Vec<EnumMember>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, value: impl Into<EnumLiteral>) -> Self {
        self.values.push(EnumMember {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: EnumLiteral,
}

/// A database the workspace talks to.
///
/// The dialect is kept as authored until completion validates and
/// normalizes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    pub fn connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// The validated dialect, if one is set.
    pub fn parsed_dialect(&self) -> Result<Option<Dialect>, DomainError> {
        self.dialect.as_deref().map(str::parse).transpose()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
