//! Domain value objects: Dialect, PropertyType, Cardinality, EnumLiteral,
//! package identifiers.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity. They hold NO
//! registry logic. Dialect capabilities (driver packages, connection class)
//! live in `dialects.rs`. This file defines the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding a New Dialect
//!
//! 1. Add the enum variant here and its `as_str` arm
//! 2. Add a `DialectDef` entry in `dialects.rs` (aliases, packages, class)
//! 3. Done: parsing and dependency resolution derive from the registry

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Dialect ──────────────────────────────────────────────────────────────────

/// A supported database dialect.
///
/// The set is fixed. Anything else fails with
/// [`DomainError::UnsupportedDialect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    MySql,
    MariaDb,
    PostgreSql,
    SqlServer,
    Oracle,
    MongoDb,
    SqlJs,
}

impl Dialect {
    /// Canonical spelling, as persisted in the configuration document.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::MariaDb => "MariaDB",
            Self::PostgreSql => "PostgreSQL",
            Self::SqlServer => "SqlServer",
            Self::Oracle => "Oracle",
            Self::MongoDb => "MongoDB",
            Self::SqlJs => "SQLjs",
        }
    }

    /// Whether a data source of this dialect needs an explicit connection.
    ///
    /// Delegates to `dialects::find_dialect`.
    pub fn requires_connection(self) -> bool {
        crate::domain::dialects::find_dialect(self).class == DialectClass::Server
    }

    /// Connection to synthesize when the author gave none.
    ///
    /// Only embedded dialects have one; server-class dialects return `None`.
    pub fn default_connection(self, source: &str, data_dir: &str) -> Option<String> {
        match crate::domain::dialects::find_dialect(self).class {
            DialectClass::Embedded => Some(format!("{data_dir}/{source}.db")),
            DialectClass::Server => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        crate::domain::dialects::DIALECT_REGISTRY
            .iter()
            .find(|def| {
                def.dialect.as_str().eq_ignore_ascii_case(&wanted)
                    || def.aliases.iter().any(|a| *a == wanted)
            })
            .map(|def| def.dialect)
            .ok_or_else(|| DomainError::UnsupportedDialect {
                dialect: s.to_string(),
            })
    }
}

/// Whether a dialect talks to a server or to an embedded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectClass {
    Server,
    Embedded,
}

// ── PropertyType ─────────────────────────────────────────────────────────────

/// Semantic type of an entity property.
///
/// Unknown type names are kept verbatim in [`PropertyType::Other`] and passed
/// through the type mapper unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Integer,
    Decimal,
    #[default]
    Text,
    DateTime,
    Date,
    Time,
    Boolean,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Text => "string",
            Self::DateTime => "dateTime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Boolean => "boolean",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "integer" | "int" => Self::Integer,
            "decimal" => Self::Decimal,
            "" | "string" | "text" => Self::Text,
            "dateTime" | "datetime" => Self::DateTime,
            "date" => Self::Date,
            "time" => Self::Time,
            "boolean" | "bool" => Self::Boolean,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Cardinality ──────────────────────────────────────────────────────────────

/// Relation cardinality, in the ORM runtime's convention.
///
/// `ManyToOne` is the collection side: many target records point at one
/// record of the declaring entity. `OneToMany` and `OneToOne` hold a single
/// reference to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
}

impl Cardinality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "oneToOne",
            Self::OneToMany => "oneToMany",
            Self::ManyToOne => "manyToOne",
        }
    }

    /// Whether the declaring side holds an ordered collection of targets.
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::ManyToOne)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EnumLiteral ──────────────────────────────────────────────────────────────

/// Literal value of an enum member. Numbers keep their original formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    Number(serde_json::Number),
    Text(String),
}

impl From<i64> for EnumLiteral {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for EnumLiteral {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// ── Packages ─────────────────────────────────────────────────────────────────

/// Identifier of an external package, e.g. `pg` or `sql.js`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which manifest a package is looked up in and installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallScope {
    Local,
    Global,
}

/// How a package is recorded in the workspace manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Runtime,
    Development,
}

/// A package the workspace needs, with the way it should be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRequirement {
    pub id: PackageId,
    pub kind: DependencyKind,
}

impl PackageRequirement {
    pub fn runtime(id: impl Into<String>) -> Self {
        Self {
            id: PackageId::new(id),
            kind: DependencyKind::Runtime,
        }
    }

    pub fn development(id: impl Into<String>) -> Self {
        Self {
            id: PackageId::new(id),
            kind: DependencyKind::Development,
        }
    }
}
