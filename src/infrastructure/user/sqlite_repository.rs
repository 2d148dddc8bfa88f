//! SQLite user repository implementation

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;
use tracing::{debug, info};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

const SELECT_ALL_USERS: &str = r#"
    SELECT u.id, u.name, u.age, u.gender_id, u.user_name,
           u.insert_date, u.update_date, g.gender_name
    FROM users u
    LEFT JOIN gender g ON u.gender_id = g.gender_id
    ORDER BY u.id
"#;

const SELECT_USER_BY_ID: &str = r#"
    SELECT u.id, u.name, u.age, u.gender_id, u.user_name,
           u.insert_date, u.update_date, g.gender_name
    FROM users u
    LEFT JOIN gender g ON u.gender_id = g.gender_id
    WHERE u.id = ?
"#;

const INSERT_USER: &str =
    "INSERT INTO users (name, age, gender_id, user_name) VALUES (?, ?, ?, ?)";

const UPDATE_USER: &str = r#"
    UPDATE users
    SET name = ?, age = ?, gender_id = ?, user_name = ?,
        update_date = max(
            strftime('%Y-%m-%d %H:%M:%f', 'now'),
            strftime('%Y-%m-%d %H:%M:%f', update_date, '+0.001 seconds')
        )
    WHERE id = ?
"#;

const DELETE_USER: &str = "DELETE FROM users WHERE id = ?";

const COUNT_USERS_BY_USERNAME: &str = "SELECT COUNT(*) FROM users WHERE user_name = ?";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    age: Option<i64>,
    gender_id: Option<i64>,
    user_name: String,
    insert_date: Option<NaiveDateTime>,
    update_date: Option<NaiveDateTime>,
    gender_name: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let age = row
            .age
            .map(i32::try_from)
            .transpose()
            .map_err(|e| DomainError::storage(format!("Invalid age in database: {}", e)))?;

        Ok(User {
            id: Some(row.id),
            name: row.name,
            age,
            gender_id: row.gender_id,
            username: row.user_name,
            created_at: row.insert_date,
            updated_at: row.update_date,
            gender_name: row.gender_name,
        })
    }
}

/// SQLite implementation of UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(SELECT_ALL_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        debug!(count = rows.len(), "Users retrieved");

        rows.into_iter().map(User::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to get user with ID {}: {}", id, e))
            })?;

        match row {
            Some(row) => User::try_from(row),
            None => Err(DomainError::user_not_found(id)),
        }
    }

    async fn create(&self, user: &User) -> Result<i64, DomainError> {
        let result = sqlx::query(INSERT_USER)
            .bind(&user.name)
            .bind(user.age)
            .bind(user.gender_id)
            .bind(&user.username)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("create", user, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::storage("Failed to create user: no row inserted"));
        }

        let id = result.last_insert_rowid();

        if id <= 0 {
            return Err(DomainError::storage(
                "Failed to create user: no identifier returned",
            ));
        }

        info!(id, username = %user.username, "User created");

        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let id = user
            .id
            .ok_or_else(|| DomainError::validation("User ID is required for update"))?;

        let result = sqlx::query(UPDATE_USER)
            .bind(&user.name)
            .bind(user.age)
            .bind(user.gender_id)
            .bind(&user.username)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("update", user, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(id));
        }

        info!(id, "User updated");

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query(DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to delete user with ID {}: {}", id, e))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(id));
        }

        info!(id, "User deleted");

        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(COUNT_USERS_BY_USERNAME)
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to check username '{}': {}",
                    username, e
                ))
            })?;

        Ok(count > 0)
    }
}

/// Map a failed insert/update to the most specific domain error
fn write_error(action: &str, user: &User, e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::already_exists(&user.username);
        }

        if db_err.is_foreign_key_violation() {
            if let Some(gender_id) = user.gender_id {
                return DomainError::gender_not_found(gender_id);
            }
        }

        if db_err.is_check_violation() {
            return DomainError::business_rule(format!(
                "Store rejected user '{}': {}",
                user.username,
                db_err.message()
            ));
        }
    }

    DomainError::storage(format!("Failed to {} user: {}", action, e))
}
