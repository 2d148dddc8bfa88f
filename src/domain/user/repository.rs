//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::error::{DomainError, EntityKind};

#[cfg(test)]
use mockall::automock;

/// Data access for the `users` table
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users, each joined with its gender name
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by ID; `NotFound{User}` if there is no such row
    async fn get(&self, id: i64) -> Result<User, DomainError>;

    /// Insert a user and return the store-generated ID
    async fn create(&self, user: &User) -> Result<i64, DomainError>;

    /// Update all mutable fields of the user identified by `user.id`
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user; `NotFound{User}` if nothing was deleted
    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    /// Check whether any user already has this username
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError>;

    /// Check whether a user ID exists
    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found(EntityKind::User) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
