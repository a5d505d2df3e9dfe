//! Account domain
//!
//! This module provides domain types and traits for account registration,
//! including the user entity, the registration request, its validation
//! rules, and the repository and registrar traits.

mod entity;
mod registrar;
mod repository;
mod request;
mod validation;

pub use entity::{User, UserId};
pub use registrar::{RegistrationError, Registrar};
pub use repository::UserRepository;
pub use request::{RegistrationField, RegistrationRequest};
pub use validation::{
    validate_email, validate_first_name, validate_last_name, validate_password,
    validate_password_confirmation, validate_user_name, RegistrationValidator,
    RegistrationViolation, ValidationErrors, Violation,
};

#[cfg(test)]
pub use registrar::MockRegistrar;
#[cfg(test)]
pub use repository::mock::MockUserRepository;
