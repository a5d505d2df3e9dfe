//! Account infrastructure module
//!
//! This module provides the user stores (in-memory and PostgreSQL) and the
//! registration service that implements the `Registrar` capability.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::{PostgresUserRepository, EMAIL_UNIQUE_INDEX, USER_NAME_UNIQUE_INDEX};
pub use repository::InMemoryUserRepository;
pub use service::RegistrationService;
