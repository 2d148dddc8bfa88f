use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entity a `NotFound` error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Gender,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::Gender => write!(f, "Gender"),
        }
    }
}

/// Discriminant of a [`DomainError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyExists,
    Storage,
    BusinessRuleViolation,
    Unknown,
}

impl ErrorKind {
    /// Short human readable label for reports
    pub fn description(&self) -> &'static str {
        match self {
            Self::Validation => "Validation error",
            Self::NotFound => "Not found",
            Self::AlreadyExists => "Already exists",
            Self::Storage => "Database error",
            Self::BusinessRuleViolation => "Business rule violation",
            Self::Unknown => "Unknown error",
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} not found with ID: {id}")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("Username already exists: {username}")]
    AlreadyExists { username: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRuleViolation { message: String },

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: EntityKind::User,
            id,
        }
    }

    pub fn gender_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: EntityKind::Gender,
            id,
        }
    }

    pub fn already_exists(username: impl Into<String>) -> Self {
        Self::AlreadyExists {
            username: username.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::BusinessRuleViolation { .. } => ErrorKind::BusinessRuleViolation,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Short label for reports; `NotFound` names the missing entity
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound {
                entity: EntityKind::User,
                ..
            } => "User not found",
            Self::NotFound {
                entity: EntityKind::Gender,
                ..
            } => "Gender not found",
            other => other.kind().description(),
        }
    }

    /// True if this is a `NotFound` for the given entity
    pub fn is_not_found(&self, kind: EntityKind) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == kind)
    }
}
