//! Gender service

use std::sync::Arc;

use crate::domain::gender::{Gender, GenderRepository};
use crate::domain::user::validate_id;
use crate::domain::DomainError;

/// Read access to genders, with ID validation in front of the store
#[derive(Debug)]
pub struct GenderService<R: GenderRepository> {
    repository: Arc<R>,
}

impl<R: GenderRepository> GenderService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Gender>, DomainError> {
        self.repository.list().await
    }

    /// Get a gender by ID; IDs `<= 0` are rejected without querying the store
    pub async fn get(&self, id: i64) -> Result<Gender, DomainError> {
        validate_id(id).map_err(|e| DomainError::validation(format!("Gender {}", e)))?;
        self.repository.get(id).await
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        self.repository.exists(id).await
    }
}
