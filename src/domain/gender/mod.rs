//! Gender domain
//!
//! Genders are reference data seeded by migrations; this crate only reads them.

mod entity;
mod repository;

pub use entity::Gender;
pub use repository::GenderRepository;

#[cfg(test)]
pub use repository::MockGenderRepository;
