// ============================================================================
// domain/error.rs - SCHEMA ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Circular inheritance: {}", chain.join(" -> "))]
    CyclicExtends { chain: Vec<String> },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("Dialect '{dialect}' is not supported")]
    UnsupportedDialect { dialect: String },

    #[error("Data source '{source_name}' ({dialect}) has no connection")]
    MissingConnection { source_name: String, dialect: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Relation '{relation}' of entity '{entity}' targets unknown entity '{target}'")]
    DanglingRelation {
        entity: String,
        relation: String,
        target: String,
    },

    #[error("Entity '{entity}' extends unknown entity '{parent}'")]
    DanglingExtends { entity: String, parent: String },

    #[error("Property '{property}' of entity '{entity}' references unknown enum '{enum_name}'")]
    DanglingEnum {
        entity: String,
        property: String,
        enum_name: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedDialect { dialect } => vec![
                format!("'{}' is not a known dialect", dialect),
                "Supported dialects:".into(),
                "  • MySQL, MariaDB, PostgreSQL, SqlServer, Oracle, MongoDB".into(),
                "  • SQLjs (embedded, no server needed)".into(),
            ],
            Self::MissingConnection {
                source_name,
                dialect,
            } => vec![
                format!("{} data sources need an explicit connection", dialect),
                format!(
                    "Set `connection` for source '{}' in ormforge.yaml",
                    source_name
                ),
                "Or rerun: ormforge init --connection <CONNECTION>".into(),
            ],
            Self::DanglingRelation { target, .. } => vec![
                format!("Declare an entity named '{}'", target),
                "Or fix the relation's `entity` field".into(),
            ],
            Self::DanglingExtends { parent, .. } => vec![
                format!("Declare an entity named '{}'", parent),
                "Or remove the `extends` field".into(),
            ],
            Self::DanglingEnum { enum_name, .. } => vec![
                format!("Declare an enum named '{}'", enum_name),
                "Or remove the property's `enum` field".into(),
            ],
            Self::CyclicExtends { .. } => vec![
                "An entity cannot inherit from itself, directly or indirectly".into(),
                "Break the cycle by removing one `extends`".into(),
            ],
            Self::DuplicateName {
                kind: "singular",
                name,
            } => vec![
                format!("Two entities generate the type '{}'", name),
                "Set `singular` on one of them to a distinct name".into(),
            ],
            _ => vec!["Check ormforge.yaml and try again".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSchema(_) | Self::DuplicateName { .. } | Self::CyclicExtends { .. } => {
                ErrorCategory::Validation
            }
            Self::UnsupportedDialect { .. } | Self::MissingConnection { .. } => {
                ErrorCategory::Compatibility
            }
            Self::DanglingRelation { .. }
            | Self::DanglingExtends { .. }
            | Self::DanglingEnum { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
