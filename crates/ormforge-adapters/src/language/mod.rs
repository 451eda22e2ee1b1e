//! Language backends.

mod typescript;

pub use typescript::{DEFAULT_RUNTIME_PACKAGE, TypeScriptBackend};
