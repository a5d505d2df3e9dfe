//! Registration capability

use async_trait::async_trait;
use thiserror::Error;

use super::request::RegistrationRequest;
use super::validation::ValidationErrors;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Why a registration did not go through
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The request broke one or more rules; nothing was stored
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The store could not be reached or rejected the write
    #[error(transparent)]
    Storage(#[from] DomainError),
}

impl RegistrationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationErrors> for RegistrationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Registers new accounts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Validate the request and persist exactly one user on success
    async fn register(&self, request: RegistrationRequest) -> Result<(), RegistrationError>;
}
