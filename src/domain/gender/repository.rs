//! Gender repository trait

use async_trait::async_trait;

use super::entity::Gender;
use crate::domain::error::{DomainError, EntityKind};

#[cfg(test)]
use mockall::automock;

/// Read-only data access for the `gender` table
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenderRepository: Send + Sync {
    /// List all genders in store order
    async fn list(&self) -> Result<Vec<Gender>, DomainError>;

    /// Get a gender by ID; `NotFound{Gender}` if there is no such row
    async fn get(&self, id: i64) -> Result<Gender, DomainError>;

    /// Check whether a gender ID exists
    ///
    /// Only `NotFound{Gender}` is turned into `false`; every other error is
    /// returned unchanged.
    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found(EntityKind::Gender) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
