//! Schema store adapters.

mod yaml;

pub use yaml::{CONFIG_FILE_NAME, YamlSchemaStore};
