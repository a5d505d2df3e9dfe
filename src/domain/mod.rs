//! Domain layer - Core business logic and entities

pub mod account;
pub mod error;

pub use account::{
    RegistrationError, RegistrationField, RegistrationRequest, RegistrationValidator, Registrar,
    User, UserId, UserRepository, ValidationErrors,
};
pub use error::DomainError;
