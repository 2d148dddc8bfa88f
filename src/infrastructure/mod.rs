//! Infrastructure layer - store access, services and process plumbing

pub mod database;
pub mod gender;
pub mod logging;
pub mod user;
