//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ormforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `SchemaStore`: The workspace configuration document
//!   - `ProcessRunner`: External programs
//!   - `PackageManager`: Package lookup and installation
//!   - `LanguageBackend`: Type mapping and source rendering
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    BaselineFile, Filesystem, LanguageBackend, PackageManager, ProcessOutput, ProcessRunner,
    SchemaStore, TypeMapper,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageManager};
