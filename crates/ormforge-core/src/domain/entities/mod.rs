pub mod declaration;
pub mod schema;

pub use crate::domain::DomainError;
pub use declaration::ModelDeclaration;
pub use schema::{DataSource, Entity, Schema};
