//! User entity and related types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::request::RegistrationRequest;

/// User identifier backed by a random UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account
///
/// The password is kept exactly as submitted; nothing in this service
/// hashes it. It is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    user_name: String,
    email: String,
    #[serde(skip_serializing)]
    password: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<RegistrationRequest> for User {
    /// Field-for-field mapping; the confirmation value is dropped
    fn from(request: RegistrationRequest) -> Self {
        Self::new(
            request.first_name,
            request.last_name,
            request.user_name,
            request.email,
            request.password,
        )
    }
}
