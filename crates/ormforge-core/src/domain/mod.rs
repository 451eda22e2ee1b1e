//! Core domain layer for ormforge.
//!
//! This module contains pure schema logic with no I/O. Filesystem access,
//! package installation and language rendering are reached through ports
//! defined in the application layer.
//!
//! ## Layout
//!
//! - `entities`: the schema document and the declaration model
//! - `naming`: singular names, reference resolution, [`SchemaIndex`]
//! - `completion`: defaulting and additive merging of schemas
//! - `dialects`: the dialect capability registry
//! - `value_objects`: small typed values shared by everything above
pub mod completion;
pub mod dialects;
pub mod entities;
pub mod error;
pub mod naming;
pub mod value_objects;

mod validation;

pub use completion::{CompletionDefaults, Overrides, SchemaCompleter};
pub use dialects::{DIALECT_REGISTRY, DialectDef, required_packages, required_packages_for};
pub use entities::{
    declaration::{
        EnumDeclaration, FieldDeclaration, FieldType, ModelDeclaration, ProjectionDeclaration,
        ProjectionField, ProjectionType, QueryableRoot, RepositoryDeclaration, TypeDeclaration,
    },
    schema::{DataSource, Entity, EnumDef, EnumMember, Paths, Property, Relation, Schema},
};
pub use error::{DomainError, ErrorCategory};
pub use naming::{SchemaIndex, resolve_relation_target, singular_of, singularize};
pub use validation::DomainValidator;
pub use value_objects::{
    Cardinality, DependencyKind, Dialect, DialectClass, EnumLiteral, InstallScope, PackageId,
    PackageRequirement, PropertyType,
};
