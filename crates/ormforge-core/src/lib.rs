//! ormforge core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the ormforge
//! schema-driven scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           ormforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, generators, install) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, SchemaStore, Packages, ..) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     ormforge-adapters (Infrastructure)  │
//! │  (LocalFilesystem, Npm, TypeScript, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Schema, SchemaIndex, SchemaCompleter) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use ormforge_core::prelude::*;
//!
//! // Adapters come from `ormforge-adapters`.
//! let service = ScaffoldService::new(store, filesystem, packages, backend, CompletionDefaults::default());
//! let report = service
//!     .create(Path::new("./shop"), &Overrides::default().dialect("postgres"))
//!     .unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildTargets, ScaffoldReport, ScaffoldService,
        ports::{Filesystem, LanguageBackend, PackageManager, ProcessRunner, SchemaStore},
    };
    pub use crate::domain::{CompletionDefaults, Dialect, Overrides, Schema};
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
