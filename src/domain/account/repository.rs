//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations must enforce case-insensitive uniqueness of user name
/// and email inside `create`; the existence checks are a fast path only.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Check whether a user name is taken, ignoring case
    async fn user_name_exists(&self, user_name: &str) -> Result<bool, DomainError>;

    /// Check whether an email is taken, ignoring case
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Insert and commit a new user
    ///
    /// Fails with `DomainError::Conflict` naming the field when the user
    /// name or email is already present.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::domain::account::RegistrationField;

    /// Mock user repository for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<Vec<User>>>,
        should_fail: Arc<RwLock<bool>>,
        /// Hide stored rows from the existence checks to simulate a lost race
        blind_checks: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Make existence checks report nothing while `create` still
        /// enforces uniqueness
        pub async fn set_blind_checks(&self, blind: bool) {
            *self.blind_checks.write().await = blind;
        }

        /// Snapshot of stored users
        pub async fn users(&self) -> Vec<User> {
            self.users.read().await.clone()
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn user_name_exists(&self, user_name: &str) -> Result<bool, DomainError> {
            self.check_should_fail().await?;

            if *self.blind_checks.read().await {
                return Ok(false);
            }

            let users = self.users.read().await;
            Ok(users
                .iter()
                .any(|u| u.user_name().to_lowercase() == user_name.to_lowercase()))
        }

        async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
            self.check_should_fail().await?;

            if *self.blind_checks.read().await {
                return Ok(false);
            }

            let users = self.users.read().await;
            Ok(users
                .iter()
                .any(|u| u.email().to_lowercase() == email.to_lowercase()))
        }

        async fn create(&self, user: User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            let user_name = user.user_name().to_lowercase();
            if users.iter().any(|u| u.user_name().to_lowercase() == user_name) {
                return Err(DomainError::conflict(
                    RegistrationField::UserName.as_str(),
                    format!("User name '{}' already exists", user.user_name()),
                ));
            }

            let email = user.email().to_lowercase();
            if users.iter().any(|u| u.email().to_lowercase() == email) {
                return Err(DomainError::conflict(
                    RegistrationField::Email.as_str(),
                    format!("Email '{}' already exists", user.email()),
                ));
            }

            users.push(user.clone());
            Ok(user)
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.check_should_fail().await?;
            Ok(self.users.read().await.len())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn create_test_user(user_name: &str, email: &str) -> User {
            User::new("Daniel", "Szopa", user_name, email, "Test123!")
        }

        #[tokio::test]
        async fn test_create_and_count() {
            let repo = MockUserRepository::new();

            repo.create(create_test_user("daniel", "daniel@test.com"))
                .await
                .unwrap();

            assert_eq!(repo.count().await.unwrap(), 1);
            assert!(repo.user_name_exists("DANIEL").await.unwrap());
            assert!(repo.email_exists("Daniel@Test.com").await.unwrap());
        }

        #[tokio::test]
        async fn test_blind_checks_still_enforce_uniqueness() {
            let repo = MockUserRepository::new();
            repo.create(create_test_user("daniel", "daniel@test.com"))
                .await
                .unwrap();

            repo.set_blind_checks(true).await;
            assert!(!repo.user_name_exists("daniel").await.unwrap());

            let result = repo.create(create_test_user("Daniel", "other@test.com")).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            assert!(repo.count().await.is_err());
            assert!(repo.user_name_exists("daniel").await.is_err());
        }
    }
}
