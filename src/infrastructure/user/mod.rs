//! User infrastructure module
//!
//! This module provides the SQLite-backed user repository and the user
//! service that validates input before it reaches the store.

mod service;
mod sqlite_repository;

pub use service::UserService;
pub use sqlite_repository::SqliteUserRepository;
