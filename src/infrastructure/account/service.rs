//! Registration service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::account::{
    RegistrationError, RegistrationField, RegistrationRequest, RegistrationValidator,
    RegistrationViolation, Registrar, User, UserRepository, ValidationErrors,
};
use crate::domain::DomainError;

/// Validates registration requests and persists the resulting users
#[derive(Debug)]
pub struct RegistrationService<R: UserRepository> {
    repository: Arc<R>,
    validator: RegistrationValidator<R>,
}

impl<R: UserRepository> RegistrationService<R> {
    /// Create a new registration service over the given store
    pub fn new(repository: Arc<R>) -> Self {
        let validator = RegistrationValidator::new(repository.clone());
        Self {
            repository,
            validator,
        }
    }

    /// Register a new account and return the stored user
    pub async fn register_user(&self, request: RegistrationRequest) -> Result<User, RegistrationError> {
        let errors = self.validator.validate(&request).await?;

        if !errors.is_empty() {
            debug!(
                user_name = %request.user_name,
                violations = errors.len(),
                "Registration rejected by validation"
            );
            return Err(RegistrationError::Validation(errors));
        }

        let user = User::from(request);

        match self.repository.create(user).await {
            Ok(user) => {
                info!(user_id = %user.id(), user_name = %user.user_name(), "User registered");
                Ok(user)
            }
            Err(DomainError::Conflict { field, message }) => {
                warn!(%field, %message, "Registration lost a uniqueness race");
                Err(RegistrationError::Validation(conflict_violation(&field)))
            }
            Err(e) => Err(RegistrationError::Storage(e)),
        }
    }
}

/// Translate a storage-level uniqueness conflict into the matching violation
fn conflict_violation(field: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if field == RegistrationField::Email.as_str() {
        errors.push(RegistrationField::Email, RegistrationViolation::EmailTaken);
    } else {
        errors.push(RegistrationField::UserName, RegistrationViolation::UserNameTaken);
    }

    errors
}

#[async_trait]
impl<R: UserRepository + 'static> Registrar for RegistrationService<R> {
    async fn register(&self, request: RegistrationRequest) -> Result<(), RegistrationError> {
        self.register_user(request).await.map(|_| ())
    }
}
