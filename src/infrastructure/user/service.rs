//! User service: field validation and referential checks in front of the store

use std::sync::Arc;

use tracing::info;

use crate::domain::gender::GenderRepository;
use crate::domain::user::{validate_id, validate_user, User, UserRepository};
use crate::domain::DomainError;

/// User service enforcing validation, username uniqueness and gender
/// existence before delegating to the repository
#[derive(Debug)]
pub struct UserService<U: UserRepository, G: GenderRepository> {
    users: Arc<U>,
    genders: Arc<G>,
}

impl<U: UserRepository, G: GenderRepository> UserService<U, G> {
    pub fn new(users: Arc<U>, genders: Arc<G>) -> Self {
        Self { users, genders }
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }

    /// Get a user by ID
    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        validate_id(id).map_err(|e| DomainError::validation(e.to_string()))?;
        self.users.get(id).await
    }

    /// Create a user and return its store-assigned ID
    ///
    /// Fails with `Validation` on any field rule, `AlreadyExists` if the
    /// username is taken and `NotFound{Gender}` if the gender does not exist.
    pub async fn create(&self, user: &User) -> Result<i64, DomainError> {
        validate_user(user).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.users.username_exists(&user.username).await? {
            return Err(DomainError::already_exists(&user.username));
        }

        self.ensure_gender_exists(user).await?;

        let id = self.users.create(user).await?;

        if id <= 0 {
            return Err(DomainError::storage(format!(
                "Store assigned an invalid ID: {}",
                id
            )));
        }

        info!(id, username = %user.username, "Created user");

        Ok(id)
    }

    /// Update every mutable field of an existing user
    pub async fn update(&self, user: &User) -> Result<(), DomainError> {
        let id = match user.id {
            Some(id) if id > 0 => id,
            _ => return Err(DomainError::validation("Invalid user ID")),
        };

        // One read serves both the existence check and the username comparison
        let existing = self.users.get(id).await?;

        validate_user(user).map_err(|e| DomainError::validation(e.to_string()))?;

        if existing.username != user.username
            && self.users.username_exists(&user.username).await?
        {
            return Err(DomainError::already_exists(&user.username));
        }

        self.ensure_gender_exists(user).await?;

        self.users.update(user).await?;

        info!(id, "Updated user");

        Ok(())
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        validate_id(id).map_err(|e| DomainError::validation(e.to_string()))?;

        if !self.users.exists(id).await? {
            return Err(DomainError::user_not_found(id));
        }

        self.users.delete(id).await?;

        info!(id, "Deleted user");

        Ok(())
    }

    async fn ensure_gender_exists(&self, user: &User) -> Result<(), DomainError> {
        match user.gender_id {
            Some(gender_id) if !self.genders.exists(gender_id).await? => {
                Err(DomainError::gender_not_found(gender_id))
            }
            _ => Ok(()),
        }
    }
}
