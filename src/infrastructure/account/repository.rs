//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{RegistrationField, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    /// Lowercased user name -> user ID
    user_name_index: HashMap<String, UserId>,
    /// Lowercased email -> user ID
    email_index: HashMap<String, UserId>,
}

/// In-memory implementation of UserRepository
///
/// Rows and both unique indexes sit behind one lock, so the uniqueness
/// check inside `create` and the insert are a single atomic step.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user by ID
    pub async fn get(&self, id: &UserId) -> Option<User> {
        self.tables.read().await.users.get(id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn user_name_exists(&self, user_name: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.user_name_index.contains_key(&user_name.to_lowercase()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.email_index.contains_key(&email.to_lowercase()))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        let id = *user.id();
        let user_name = user.user_name().to_lowercase();
        let email = user.email().to_lowercase();

        if tables.users.contains_key(&id) {
            return Err(DomainError::internal(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        if tables.user_name_index.contains_key(&user_name) {
            return Err(DomainError::conflict(
                RegistrationField::UserName.as_str(),
                format!("User name '{}' already exists", user.user_name()),
            ));
        }

        if tables.email_index.contains_key(&email) {
            return Err(DomainError::conflict(
                RegistrationField::Email.as_str(),
                format!("Email '{}' already exists", user.email()),
            ));
        }

        tables.user_name_index.insert(user_name, id);
        tables.email_index.insert(email, id);
        tables.users.insert(id, user.clone());

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.tables.read().await.users.len())
    }
}
