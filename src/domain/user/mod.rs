//! User domain
//!
//! This module provides the user entity, the field validation rules applied
//! on create and update, and the repository trait implemented by the store.

mod entity;
mod repository;
mod validation;

pub use entity::User;
pub use repository::UserRepository;
pub use validation::{
    validate_age, validate_id, validate_name, validate_user, validate_username,
    UserValidationError, MAX_AGE, MAX_NAME_LENGTH, MAX_USERNAME_LENGTH, MIN_AGE,
    MIN_NAME_LENGTH, MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
