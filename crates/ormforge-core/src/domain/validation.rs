use crate::domain::{
    entities::schema::DataSource,
    error::DomainError,
    value_objects::Dialect,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Dialect of a completed source, checking that server-class dialects
    /// carry a connection.
    pub fn validate_source(source: &DataSource) -> Result<Dialect, DomainError> {
        let dialect = source
            .parsed_dialect()?
            .ok_or_else(|| DomainError::InvalidSchema(format!(
                "data source '{}' has no dialect",
                source.name
            )))?;

        let has_connection = source
            .connection
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());

        if dialect.requires_connection() && !has_connection {
            return Err(DomainError::MissingConnection {
                source_name: source.name.clone(),
                dialect: dialect.as_str().to_string(),
            });
        }
        Ok(dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_dialect_needs_connection() {
        let source = DataSource::new("main").dialect("PostgreSQL");
        assert_eq!(
            DomainValidator::validate_source(&source),
            Err(DomainError::MissingConnection {
                source_name: "main".into(),
                dialect: "PostgreSQL".into(),
            })
        );

        let source = source.connection("postgres://localhost/shop");
        assert_eq!(DomainValidator::validate_source(&source), Ok(Dialect::PostgreSql));
    }

    #[test]
    fn embedded_dialect_needs_no_connection() {
        let source = DataSource::new("main").dialect("sqljs");
        assert_eq!(DomainValidator::validate_source(&source), Ok(Dialect::SqlJs));
    }

    #[test]
    fn blank_connection_counts_as_missing() {
        let source = DataSource::new("main").dialect("mysql").connection("  ");
        assert!(matches!(
            DomainValidator::validate_source(&source),
            Err(DomainError::MissingConnection { .. })
        ));
    }

    #[test]
    fn source_without_dialect_is_invalid() {
        let source = DataSource::new("main");
        assert!(matches!(
            DomainValidator::validate_source(&source),
            Err(DomainError::InvalidSchema(_))
        ));
    }
}
