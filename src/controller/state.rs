//! Application state for shared services

use std::sync::Arc;

use crate::domain::gender::GenderRepository;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Gender, User};
use crate::infrastructure::gender::GenderService;
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub gender_service: Arc<dyn GenderServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn get(&self, id: i64) -> Result<User, DomainError>;
    async fn create(&self, user: &User) -> Result<i64, DomainError>;
    async fn update(&self, user: &User) -> Result<(), DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

/// Trait for gender service operations
#[async_trait::async_trait]
pub trait GenderServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Gender>, DomainError>;
    async fn get(&self, id: i64) -> Result<Gender, DomainError>;
    async fn exists(&self, id: i64) -> Result<bool, DomainError>;
}

#[async_trait::async_trait]
impl<U, G> UserServiceTrait for UserService<U, G>
where
    U: UserRepository + 'static,
    G: GenderRepository + 'static,
{
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn get(&self, id: i64) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn create(&self, user: &User) -> Result<i64, DomainError> {
        UserService::create(self, user).await
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        UserService::update(self, user).await
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl<R: GenderRepository + 'static> GenderServiceTrait for GenderService<R> {
    async fn list(&self) -> Result<Vec<Gender>, DomainError> {
        GenderService::list(self).await
    }

    async fn get(&self, id: i64) -> Result<Gender, DomainError> {
        GenderService::get(self, id).await
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        GenderService::exists(self, id).await
    }
}
