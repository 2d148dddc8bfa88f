//! SQLite gender repository implementation

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;
use tracing::debug;

use crate::domain::gender::{Gender, GenderRepository};
use crate::domain::DomainError;

const SELECT_ALL_GENDERS: &str =
    "SELECT gender_id, gender_name FROM gender ORDER BY gender_id";

const SELECT_GENDER_BY_ID: &str =
    "SELECT gender_id, gender_name FROM gender WHERE gender_id = ?";

#[derive(Debug, FromRow)]
struct GenderRow {
    gender_id: i64,
    gender_name: String,
}

impl From<GenderRow> for Gender {
    fn from(row: GenderRow) -> Self {
        Gender::new(row.gender_id, row.gender_name)
    }
}

/// SQLite implementation of GenderRepository
#[derive(Debug, Clone)]
pub struct SqliteGenderRepository {
    pool: SqlitePool,
}

impl SqliteGenderRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenderRepository for SqliteGenderRepository {
    async fn list(&self) -> Result<Vec<Gender>, DomainError> {
        let rows = sqlx::query_as::<_, GenderRow>(SELECT_ALL_GENDERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list genders: {}", e)))?;

        debug!(count = rows.len(), "Genders retrieved");

        Ok(rows.into_iter().map(Gender::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Gender, DomainError> {
        let row = sqlx::query_as::<_, GenderRow>(SELECT_GENDER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to get gender with ID {}: {}", id, e))
            })?;

        row.map(Gender::from)
            .ok_or_else(|| DomainError::gender_not_found(id))
    }
}
