//! User entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A row of the `users` table
///
/// `id`, `created_at` and `updated_at` are assigned by the store; a user built
/// with [`User::new`] has none of them. `gender_name` is a read-only projection
/// filled by read queries that join against `gender`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_id: Option<i64>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_name: Option<String>,
}

impl User {
    /// Create a user that has not been persisted yet
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            age: None,
            gender_id: None,
            username: username.into(),
            created_at: None,
            updated_at: None,
            gender_name: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender_id: i64) -> Self {
        self.gender_id = Some(gender_id);
        self
    }
}

// Timestamps and the joined gender name are not part of a user's identity.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.age == other.age
            && self.gender_id == other.gender_id
            && self.username == other.username
    }
}

impl Eq for User {}
