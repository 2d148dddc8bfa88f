//! Gender infrastructure module
//!
//! SQLite data access for the `gender` reference table and the thin service
//! in front of it.

mod service;
mod sqlite_repository;

pub use service::GenderService;
pub use sqlite_repository::SqliteGenderRepository;
