//! Domain layer - entities, validation rules and repository traits

pub mod error;
pub mod gender;
pub mod user;

pub use error::{DomainError, EntityKind, ErrorKind};
pub use gender::{Gender, GenderRepository};
pub use user::{User, UserRepository, UserValidationError};
