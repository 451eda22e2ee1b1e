//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "initialize a workspace" or "rebuild the model".

pub mod model_generator;
pub mod package_installer;
pub mod repository_generator;
pub mod scaffold_service;
pub mod structure_provisioner;

pub use model_generator::ModelGenerator;
pub use package_installer::{InstallOutcome, PackageInstaller};
pub use repository_generator::RepositoryGenerator;
pub use scaffold_service::{BuildTargets, ScaffoldReport, ScaffoldService};
pub use structure_provisioner::{StructureProvisioner, WriteReport};
