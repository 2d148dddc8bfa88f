//! Controller: drives the services and reports results
//!
//! Every operation catches its own error, reports it and returns whether it
//! succeeded, so a failing step never aborts a longer run.

pub mod state;

pub use state::{AppState, GenderServiceTrait, UserServiceTrait};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{error, info};

use crate::domain::{DomainError, Gender, User};

/// How listings are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome counts of a demo run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl DemoSummary {
    fn record(&mut self, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Sample users created by the demo: name, age, gender, username
const SAMPLE_USERS: [(&str, i32, i64, &str); 3] = [
    ("María García", 30, 2, "maria.garcia"),
    ("Carlos López", 28, 1, "carlos.lopez"),
    ("Ana Martínez", 35, 2, "ana.martinez"),
];

const DEMO_LOOKUP_ID: i64 = 1;
const DEMO_DELETE_ID: i64 = 2;

pub struct UserController {
    state: AppState,
    format: OutputFormat,
}

impl UserController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub async fn show_all_users(&self) -> bool {
        println!("\n=== USERS ===");
        let result = async {
            let users = self.state.user_service.list().await?;

            match self.format {
                OutputFormat::Json => println!("{}", render_json(&users)?),
                OutputFormat::Text if users.is_empty() => println!("No users registered."),
                OutputFormat::Text => {
                    for user in &users {
                        println!("{}", format_user(user));
                    }
                }
            }

            Ok::<(), DomainError>(())
        }
        .await;

        report(result)
    }

    pub async fn show_user(&self, id: i64) -> bool {
        println!("\n=== USER {} ===", id);
        let result = async {
            let user = self.state.user_service.get(id).await?;

            match self.format {
                OutputFormat::Json => println!("{}", render_json(&user)?),
                OutputFormat::Text => println!("{}", format_user(&user)),
            }

            Ok::<(), DomainError>(())
        }
        .await;

        report(result)
    }

    pub async fn create_user(
        &self,
        name: &str,
        age: Option<i32>,
        gender_id: Option<i64>,
        username: &str,
    ) -> bool {
        println!("\n=== CREATE USER ===");
        let mut user = User::new(name, username);
        user.age = age;
        user.gender_id = gender_id;

        let result = self
            .state
            .user_service
            .create(&user)
            .await
            .map(|id| println!("User created with ID: {}", id));

        report(result)
    }

    pub async fn update_user(
        &self,
        id: i64,
        name: &str,
        age: Option<i32>,
        gender_id: Option<i64>,
        username: &str,
    ) -> bool {
        println!("\n=== UPDATE USER ===");
        let mut user = User::new(name, username).with_id(id);
        user.age = age;
        user.gender_id = gender_id;

        let result = self
            .state
            .user_service
            .update(&user)
            .await
            .map(|()| println!("User updated successfully"));

        report(result)
    }

    pub async fn delete_user(&self, id: i64) -> bool {
        println!("\n=== DELETE USER ===");
        let result = self
            .state
            .user_service
            .delete(id)
            .await
            .map(|()| println!("User deleted successfully"));

        report(result)
    }

    pub async fn show_all_genders(&self) -> bool {
        println!("\n=== GENDERS ===");
        let result = async {
            let genders = self.state.gender_service.list().await?;

            match self.format {
                OutputFormat::Json => println!("{}", render_json(&genders)?),
                OutputFormat::Text => {
                    for gender in &genders {
                        println!("{}", format_gender(gender));
                    }
                }
            }

            Ok::<(), DomainError>(())
        }
        .await;

        report(result)
    }

    pub async fn show_gender(&self, id: i64) -> bool {
        println!("\n=== GENDER {} ===", id);
        let result = async {
            let gender = self.state.gender_service.get(id).await?;

            match self.format {
                OutputFormat::Json => println!("{}", render_json(&gender)?),
                OutputFormat::Text => println!("{}", format_gender(&gender)),
            }

            Ok::<(), DomainError>(())
        }
        .await;

        report(result)
    }

    /// Run the fixed demonstration sequence
    ///
    /// list, create three users, list, fetch one, update it, fetch it again,
    /// delete another, list.
    pub async fn run_sample_operations(&self) -> DemoSummary {
        println!("=== USER MANAGEMENT DEMO ===");
        let mut summary = DemoSummary::default();

        summary.record(self.show_all_users().await);

        for (name, age, gender_id, username) in SAMPLE_USERS {
            summary.record(
                self.create_user(name, Some(age), Some(gender_id), username)
                    .await,
            );
        }

        summary.record(self.show_all_users().await);
        summary.record(self.show_user(DEMO_LOOKUP_ID).await);
        summary.record(
            self.update_user(
                DEMO_LOOKUP_ID,
                "Juan Pérez Actualizado",
                Some(26),
                Some(1),
                "juan.perez.actualizado",
            )
            .await,
        );
        summary.record(self.show_user(DEMO_LOOKUP_ID).await);
        summary.record(self.delete_user(DEMO_DELETE_ID).await);
        summary.record(self.show_all_users().await);

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Demo finished"
        );

        summary
    }
}

/// Report a failed operation and turn the outcome into a flag
fn report(result: Result<(), DomainError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!(kind = ?e.kind(), error = %e, "Operation failed");
            eprintln!("{}", error_line(&e));
            false
        }
    }
}

fn error_line(e: &DomainError) -> String {
    format!("Error: {} - {}", e.description(), e)
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DomainError::unknown(format!("Failed to render JSON: {}", e)))
}

fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "Not available".to_string())
}

/// Multi-line text block describing a user
pub fn format_user(user: &User) -> String {
    let id = user
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let age = user
        .age
        .map(|age| age.to_string())
        .unwrap_or_else(|| "Not specified".to_string());
    let gender = user.gender_name.as_deref().unwrap_or("Not specified");

    format!(
        "ID: {}\nName: {}\nAge: {}\nGender: {}\nUsername: {}\nCreated: {}\nUpdated: {}\n---",
        id,
        user.name,
        age,
        gender,
        user.username,
        format_timestamp(user.created_at),
        format_timestamp(user.updated_at),
    )
}

pub fn format_gender(gender: &Gender) -> String {
    format!("{}: {}", gender.id, gender.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::domain::user::validate_user;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::gender::{GenderService, SqliteGenderRepository};
    use crate::infrastructure::user::{SqliteUserRepository, UserService};

    /// Keeps users in a map and applies only the field rules
    #[derive(Default)]
    struct StubUserService {
        users: Mutex<BTreeMap<i64, User>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl UserServiceTrait for StubUserService {
        async fn list(&self) -> Result<Vec<User>, DomainError> {
            Ok(self.users.lock().unwrap().values().cloned().collect())
        }

        async fn get(&self, id: i64) -> Result<User, DomainError> {
            self.users
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| DomainError::user_not_found(id))
        }

        async fn create(&self, user: &User) -> Result<i64, DomainError> {
            validate_user(user).map_err(|e| DomainError::validation(e.to_string()))?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            self.users
                .lock()
                .unwrap()
                .insert(id, user.clone().with_id(id));
            Ok(id)
        }

        async fn update(&self, user: &User) -> Result<(), DomainError> {
            let id = user.id.unwrap_or_default();
            let mut users = self.users.lock().unwrap();
            match users.get_mut(&id) {
                Some(existing) => {
                    *existing = user.clone();
                    Ok(())
                }
                None => Err(DomainError::user_not_found(id)),
            }
        }

        async fn delete(&self, id: i64) -> Result<(), DomainError> {
            self.users
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| DomainError::user_not_found(id))
        }
    }

    /// Fails every call with a storage error
    struct FailingService;

    #[async_trait]
    impl UserServiceTrait for FailingService {
        async fn list(&self) -> Result<Vec<User>, DomainError> {
            Err(DomainError::storage("database is down"))
        }

        async fn get(&self, _id: i64) -> Result<User, DomainError> {
            Err(DomainError::storage("database is down"))
        }

        async fn create(&self, _user: &User) -> Result<i64, DomainError> {
            Err(DomainError::storage("database is down"))
        }

        async fn update(&self, _user: &User) -> Result<(), DomainError> {
            Err(DomainError::storage("database is down"))
        }

        async fn delete(&self, _id: i64) -> Result<(), DomainError> {
            Err(DomainError::storage("database is down"))
        }
    }

    #[async_trait]
    impl GenderServiceTrait for FailingService {
        async fn list(&self) -> Result<Vec<Gender>, DomainError> {
            Err(DomainError::storage("database is down"))
        }

        async fn get(&self, _id: i64) -> Result<Gender, DomainError> {
            Err(DomainError::storage("database is down"))
        }

        async fn exists(&self, _id: i64) -> Result<bool, DomainError> {
            Err(DomainError::storage("database is down"))
        }
    }

    fn stub_controller() -> (Arc<StubUserService>, UserController) {
        let users = Arc::new(StubUserService::default());
        let state = AppState {
            user_service: users.clone(),
            gender_service: Arc::new(FailingService),
        };
        (users, UserController::new(state))
    }

    #[tokio::test]
    async fn test_demo_against_stub() {
        let (users, controller) = stub_controller();

        let summary = controller.run_sample_operations().await;

        assert_eq!(summary, DemoSummary { succeeded: 10, failed: 0 });
        let remaining = users.list().await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].username, "juan.perez.actualizado");
        assert_eq!(remaining[1].username, "ana.martinez");
    }

    #[tokio::test]
    async fn test_demo_continues_after_every_failure() {
        let failing = Arc::new(FailingService);
        let controller = UserController::new(AppState {
            user_service: failing.clone(),
            gender_service: failing,
        });

        let summary = controller.run_sample_operations().await;

        assert_eq!(summary, DemoSummary { succeeded: 0, failed: 10 });
    }

    #[tokio::test]
    async fn test_operations_report_failure_flags() {
        let (_users, controller) = stub_controller();

        assert!(!controller.create_user("A", None, None, "abc").await);
        assert!(!controller.show_user(9).await);
        assert!(!controller.delete_user(9).await);
        assert!(!controller.show_all_genders().await);
        assert!(controller.create_user("Ana", None, None, "ana").await);
        assert!(controller.show_user(1).await);
    }

    #[tokio::test]
    async fn test_json_output_mode() {
        let (_users, controller) = stub_controller();
        let controller = controller.with_format(OutputFormat::Json);

        assert!(controller.create_user("Ana", Some(35), Some(2), "ana").await);
        assert!(controller.show_all_users().await);
        assert!(controller.show_user(1).await);
    }

    #[tokio::test]
    async fn test_demo_against_store() {
        let db = test_database().await;
        let genders = Arc::new(SqliteGenderRepository::new(db.pool().clone()));
        let users = Arc::new(SqliteUserRepository::new(db.pool().clone()));
        let user_service = Arc::new(UserService::new(users, genders.clone()));
        let controller = UserController::new(AppState {
            user_service: user_service.clone(),
            gender_service: Arc::new(GenderService::new(genders)),
        });

        let summary = controller.run_sample_operations().await;

        assert_eq!(summary.failed, 0);
        let remaining = user_service.list().await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].name, "Juan Pérez Actualizado");
        assert_eq!(remaining[0].gender_name.as_deref(), Some("Male"));
        assert_eq!(remaining[1].username, "ana.martinez");

        assert!(controller.show_all_genders().await);
        assert!(controller.show_gender(2).await);
        assert!(!controller.show_gender(0).await);
    }

    #[test]
    fn test_format_user_placeholders() {
        let text = format_user(&User::new("Ana Martínez", "ana.martinez").with_id(3));

        assert!(text.contains("ID: 3"));
        assert!(text.contains("Age: Not specified"));
        assert!(text.contains("Gender: Not specified"));
        assert!(text.contains("Created: Not available"));
    }

    #[test]
    fn test_format_user_full() {
        let mut user = User::new("María García", "maria.garcia").with_id(1).with_age(30);
        user.gender_name = Some("Female".to_string());

        let text = format_user(&user);
        assert!(text.contains("Name: María García"));
        assert!(text.contains("Age: 30"));
        assert!(text.contains("Gender: Female"));
        assert!(text.contains("Username: maria.garcia"));
    }

    #[test]
    fn test_error_line_names_missing_entity() {
        assert_eq!(
            error_line(&DomainError::gender_not_found(7)),
            "Error: Gender not found - Gender not found with ID: 7"
        );
        assert_eq!(
            error_line(&DomainError::user_not_found(2)),
            "Error: User not found - User not found with ID: 2"
        );
    }

    #[test]
    fn test_format_gender() {
        assert_eq!(format_gender(&Gender::new(2, "Female")), "2: Female");
    }
}
