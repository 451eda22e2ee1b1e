//! Infrastructure adapters for ormforge.
//!
//! This crate implements the ports defined in `ormforge_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod language;
pub mod package_manager;
pub mod process;
pub mod schema_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use language::{DEFAULT_RUNTIME_PACKAGE, TypeScriptBackend};
pub use package_manager::NpmPackageManager;
pub use process::SystemProcessRunner;
pub use schema_store::{CONFIG_FILE_NAME, YamlSchemaStore};
