//! User validation utilities

use thiserror::Error;

use super::entity::User;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Name must be between {0} and {1} characters")]
    NameLength(usize, usize),

    #[error("Age must be between {0} and {1}")]
    AgeOutOfRange(i32, i32),

    #[error("Username is required")]
    EmptyUsername,

    #[error("Username must be between {0} and {1} characters")]
    UsernameLength(usize, usize),

    #[error("ID must be greater than 0")]
    InvalidId,
}

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Validate the mutable fields of a user
///
/// Rules are checked in order and the first failure is returned:
/// - name is not blank
/// - name is 2..=100 characters
/// - age, when given, is 0..=150
/// - username is not blank
/// - username is 3..=50 characters
pub fn validate_user(user: &User) -> Result<(), UserValidationError> {
    validate_name(&user.name)?;

    if let Some(age) = user.age {
        validate_age(age)?;
    }

    validate_username(&user.username)
}

pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    let len = name.chars().count();

    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(UserValidationError::NameLength(
            MIN_NAME_LENGTH,
            MAX_NAME_LENGTH,
        ));
    }

    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), UserValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(UserValidationError::AgeOutOfRange(MIN_AGE, MAX_AGE));
    }

    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.trim().is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    let len = username.chars().count();

    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(UserValidationError::UsernameLength(
            MIN_USERNAME_LENGTH,
            MAX_USERNAME_LENGTH,
        ));
    }

    Ok(())
}

/// Validate a store identifier supplied by a caller
pub fn validate_id(id: i64) -> Result<(), UserValidationError> {
    if id <= 0 {
        return Err(UserValidationError::InvalidId);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, username: &str) -> User {
        User::new(name, username)
    }

    #[test]
    fn test_valid_user() {
        assert!(validate_user(&user("María García", "maria.garcia")).is_ok());
        assert!(validate_user(&user("Al", "abc")).is_ok());
        assert!(validate_user(&user("Bo", "bob").with_age(0)).is_ok());
        assert!(validate_user(&user("Bo", "bob").with_age(150)).is_ok());
    }

    #[test]
    fn test_blank_name() {
        assert_eq!(
            validate_user(&user("", "maria.garcia")),
            Err(UserValidationError::EmptyName)
        );
        assert_eq!(
            validate_user(&user("   ", "maria.garcia")),
            Err(UserValidationError::EmptyName)
        );
    }

    #[test]
    fn test_name_length_bounds() {
        assert_eq!(
            validate_user(&user("A", "maria.garcia")),
            Err(UserValidationError::NameLength(2, 100))
        );
        assert!(validate_user(&user(&"a".repeat(100), "maria.garcia")).is_ok());
        assert_eq!(
            validate_user(&user(&"a".repeat(101), "maria.garcia")),
            Err(UserValidationError::NameLength(2, 100))
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 100 two-byte characters
        assert!(validate_name(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(
            validate_user(&user("Bo", "bob").with_age(-1)),
            Err(UserValidationError::AgeOutOfRange(0, 150))
        );
        assert_eq!(
            validate_user(&user("Bo", "bob").with_age(151)),
            Err(UserValidationError::AgeOutOfRange(0, 150))
        );
    }

    #[test]
    fn test_username_rules() {
        assert_eq!(
            validate_user(&user("Bo", " ")),
            Err(UserValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_user(&user("Bo", "ab")),
            Err(UserValidationError::UsernameLength(3, 50))
        );
        assert!(validate_user(&user("Bo", &"u".repeat(50))).is_ok());
        assert_eq!(
            validate_user(&user("Bo", &"u".repeat(51))),
            Err(UserValidationError::UsernameLength(3, 50))
        );
    }

    #[test]
    fn test_rules_fail_in_order() {
        // Both name and username are invalid; the name rule wins
        assert_eq!(
            validate_user(&user("A", "x")),
            Err(UserValidationError::NameLength(2, 100))
        );
        // Age is checked before the username
        assert_eq!(
            validate_user(&user("Bo", "x").with_age(200)),
            Err(UserValidationError::AgeOutOfRange(0, 150))
        );
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1).is_ok());
        assert_eq!(validate_id(0), Err(UserValidationError::InvalidId));
        assert_eq!(validate_id(-5), Err(UserValidationError::InvalidId));
    }
}
