//! Gender entity

use serde::{Deserialize, Serialize};

/// A row of the `gender` table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gender {
    pub id: i64,
    pub name: String,
}

impl Gender {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_equality_by_value() {
        assert_eq!(Gender::new(1, "Male"), Gender::new(1, "Male"));
        assert_ne!(Gender::new(1, "Male"), Gender::new(2, "Male"));
        assert_ne!(Gender::new(1, "Male"), Gender::new(1, "Female"));
    }
}
