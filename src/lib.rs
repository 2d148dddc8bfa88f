//! User management
//!
//! A layered CRUD application over users and a fixed gender catalogue:
//! - Domain entities, validation rules and repository traits
//! - SQLite repositories, migrations and services
//! - A controller that reports every operation's outcome

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use controller::AppState;
use infrastructure::database::Database;
use infrastructure::gender::{GenderService, SqliteGenderRepository};
use infrastructure::user::{SqliteUserRepository, UserService};
use tracing::info;

/// Wire repositories and services over an open database
pub fn create_app_state(database: &Database) -> AppState {
    let gender_repository = Arc::new(SqliteGenderRepository::new(database.pool().clone()));
    let user_repository = Arc::new(SqliteUserRepository::new(database.pool().clone()));

    let user_service = Arc::new(UserService::new(user_repository, gender_repository.clone()));
    let gender_service = Arc::new(GenderService::new(gender_repository));

    info!("Application state initialized");

    AppState {
        user_service,
        gender_service,
    }
}
