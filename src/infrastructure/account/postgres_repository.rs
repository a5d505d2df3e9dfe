//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::account::{RegistrationField, User, UserRepository};
use crate::domain::DomainError;

/// Unique index on `lower(user_name)`
pub const USER_NAME_UNIQUE_INDEX: &str = "users_user_name_lower_key";
/// Unique index on `lower(email)`
pub const EMAIL_UNIQUE_INDEX: &str = "users_email_lower_key";

/// PostgreSQL implementation of UserRepository
///
/// The unique indexes created by the users migration are the authoritative
/// guard against duplicate registrations.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn user_name_exists(&self, user_name: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(user_name) = lower($1))",
        )
        .bind(user_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check user name: {}", e)))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check email: {}", e)))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, user_name, email, password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.user_name())
        .bind(user.email())
        .bind(user.password())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user))?;

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn map_insert_error(error: sqlx::Error, user: &User) -> DomainError {
    let constraint = match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => db.constraint(),
        _ => return DomainError::storage(format!("Failed to create user: {}", error)),
    };

    conflict_for_constraint(constraint, user)
        .unwrap_or_else(|| DomainError::storage(format!("Failed to create user: {}", error)))
}

fn conflict_for_constraint(constraint: Option<&str>, user: &User) -> Option<DomainError> {
    match constraint {
        Some(USER_NAME_UNIQUE_INDEX) => Some(DomainError::conflict(
            RegistrationField::UserName.as_str(),
            format!("User name '{}' already exists", user.user_name()),
        )),
        Some(EMAIL_UNIQUE_INDEX) => Some(DomainError::conflict(
            RegistrationField::Email.as_str(),
            format!("Email '{}' already exists", user.email()),
        )),
        _ => None,
    }
}
