//! Application layer for ormforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService and its steps)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! schema rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BuildTargets, InstallOutcome, ModelGenerator, PackageInstaller, RepositoryGenerator,
    ScaffoldReport, ScaffoldService, StructureProvisioner, WriteReport,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BaselineFile, Filesystem, LanguageBackend, PackageManager, ProcessOutput, ProcessRunner,
    SchemaStore, TypeMapper,
};

pub use error::ApplicationError;
