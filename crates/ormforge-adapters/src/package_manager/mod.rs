//! Package manager adapters.

mod npm;

pub use npm::{NpmPackageManager, parse_list_version};
