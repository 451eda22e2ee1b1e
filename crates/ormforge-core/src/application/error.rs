//! Application layer errors.
//!
//! These errors represent failures in orchestration and side effects, not
//! schema problems. Schema problems are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving ports.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The package manager could not install a package.
    #[error("Failed to install '{package}': {reason}")]
    InstallError { package: String, reason: String },

    /// An external program could not be started or exited abnormally.
    #[error("Command '{command}' failed: {reason}")]
    ProcessFailed { command: String, reason: String },

    /// The configuration document could not be parsed or written.
    #[error("Invalid configuration document {path}: {reason}")]
    SchemaDocument { path: PathBuf, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::InstallError { package, .. } => vec![
                format!("Try installing it manually: npm install {}", package),
                "Check your network connection and npm registry settings".into(),
                "Packages installed before the failure are kept; rerun to continue".into(),
            ],
            Self::ProcessFailed { command, .. } => vec![
                format!("Make sure '{}' is installed and on your PATH", command),
            ],
            Self::SchemaDocument { path, .. } => vec![
                format!("Fix the YAML syntax in {}", path.display()),
                "Or remove the file and run: ormforge init".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::InstallError { .. } | Self::ProcessFailed { .. } => ErrorCategory::Compatibility,
            Self::SchemaDocument { .. } => ErrorCategory::Configuration,
        }
    }
}
