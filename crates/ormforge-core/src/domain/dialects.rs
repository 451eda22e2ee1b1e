//! Dialect capability registry.
//!
//! Each supported dialect is described exactly once by its [`DialectDef`]:
//! the spellings accepted from authors, the driver packages a generated
//! workspace needs, and whether it connects to a server or an embedded file.
//! Parsing, connection defaulting and dependency resolution are all table
//! lookups over [`DIALECT_REGISTRY`].
//!
//! # Adding a New Dialect
//!
//! 1. Add a variant to `Dialect` in `value_objects.rs`
//! 2. Add one [`DialectDef`] entry to [`DIALECT_REGISTRY`]

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Dialect, DialectClass, PackageId};

/// Everything the domain needs to know about one dialect.
#[derive(Debug, Clone, Copy)]
pub struct DialectDef {
    /// The dialect this entry describes.
    pub dialect: Dialect,

    /// Lowercase spellings accepted in addition to the canonical name.
    pub aliases: &'static [&'static str],

    /// Driver packages the generated workspace must have installed.
    pub packages: &'static [&'static str],

    /// Server-class dialects need an explicit connection.
    pub class: DialectClass,
}

/// Single source of truth for dialect capabilities.
pub static DIALECT_REGISTRY: &[DialectDef] = &[
    DialectDef {
        dialect: Dialect::MySql,
        aliases: &["mysql"],
        packages: &["mysql2"],
        class: DialectClass::Server,
    },
    DialectDef {
        dialect: Dialect::MariaDb,
        aliases: &["mariadb"],
        packages: &["mysql2"],
        class: DialectClass::Server,
    },
    DialectDef {
        dialect: Dialect::PostgreSql,
        aliases: &["postgresql", "postgres", "pg"],
        packages: &["pg"],
        class: DialectClass::Server,
    },
    DialectDef {
        dialect: Dialect::SqlServer,
        aliases: &["sqlserver", "mssql"],
        packages: &["tedious"],
        class: DialectClass::Server,
    },
    DialectDef {
        dialect: Dialect::Oracle,
        aliases: &["oracle"],
        packages: &["oracledb"],
        class: DialectClass::Server,
    },
    DialectDef {
        dialect: Dialect::MongoDb,
        aliases: &["mongodb", "mongo"],
        packages: &["mongodb"],
        class: DialectClass::Server,
    },
    DialectDef {
        dialect: Dialect::SqlJs,
        aliases: &["sqljs", "sql.js"],
        packages: &["sql.js"],
        class: DialectClass::Embedded,
    },
];

/// Look up the registry entry of a dialect.
///
/// # Panics
///
/// Panics if a `Dialect` variant has no registry entry, which is a bug in
/// this module rather than a user error.
pub fn find_dialect(dialect: Dialect) -> &'static DialectDef {
    DIALECT_REGISTRY
        .iter()
        .find(|def| def.dialect == dialect)
        .unwrap_or_else(|| panic!("dialect {dialect} missing from DIALECT_REGISTRY"))
}

/// Driver packages required by a dialect, in registry order.
pub fn required_packages(dialect: Dialect) -> Vec<PackageId> {
    find_dialect(dialect)
        .packages
        .iter()
        .map(|p| PackageId::new(*p))
        .collect()
}

/// Driver packages for a dialect given by name.
///
/// Fails with [`DomainError::UnsupportedDialect`] for names outside the
/// fixed set.
pub fn required_packages_for(name: &str) -> Result<Vec<PackageId>, DomainError> {
    let dialect: Dialect = name.parse()?;
    Ok(required_packages(dialect))
}
