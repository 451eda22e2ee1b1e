//! Intermediate declaration model.
//!
//! The model generator first decides *what* to declare (this module) and
//! only then hands the result to a language backend that decides *how* to
//! print it. Type names in here are already resolved: singular entity names,
//! enum names, and scalar names produced by the backend's type mapper.

use crate::domain::value_objects::{Cardinality, EnumLiteral};

/// Everything that goes into the generated model artifact, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDeclaration {
    pub enums: Vec<EnumDeclaration>,
    pub types: Vec<TypeDeclaration>,
    pub roots: Vec<QueryableRoot>,
}

impl ModelDeclaration {
    pub fn type_named(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub name: String,
    pub members: Vec<(String, EnumLiteral)>,
}

/// A record type plus its companion projection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Singular type name.
    pub name: String,
    pub is_abstract: bool,
    /// Singular name of the parent type.
    pub parent: Option<String>,
    pub fields: Vec<FieldDeclaration>,
    pub projection: ProjectionDeclaration,
}

impl TypeDeclaration {
    /// Fields the constructor must initialize to an empty collection.
    pub fn collections(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.fields
            .iter()
            .filter(|f| matches!(f.field_type, FieldType::Collection(_)))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub field_type: FieldType,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Mapped scalar or enum name.
    Scalar(String),
    /// Single reference to another record type.
    Reference(String),
    /// Ordered collection of another record type, never left absent.
    Collection(String),
}

/// Query-side view of a type: every field present, relations annotated with
/// their cardinality so downstream code can tell one from many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDeclaration {
    /// Singular name of the type this projection describes.
    pub of: String,
    pub parent: Option<String>,
    pub fields: Vec<ProjectionField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionField {
    pub name: String,
    pub field_type: ProjectionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionType {
    Scalar(String),
    Relation {
        cardinality: Cardinality,
        target: String,
    },
}

/// Top-level binding through which one concrete entity is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryableRoot {
    /// Entity (storage) name, used as the binding name.
    pub name: String,
    /// Singular name whose projection types the binding.
    pub projection_of: String,
}

/// A repository skeleton for one concrete entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDeclaration {
    /// Singular type name the repository manages.
    pub type_name: String,
    /// Storage name the repository is bound to.
    pub entity_name: String,
}
