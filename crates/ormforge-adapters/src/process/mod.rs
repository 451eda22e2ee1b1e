//! Process runner adapters.

mod system;

pub(crate) use system::command_line;
pub use system::SystemProcessRunner;
