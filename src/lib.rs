//! Comics Accounts API
//!
//! User registration for the comics platform:
//! - `POST /api/account/register` with field and uniqueness validation
//! - In-memory or PostgreSQL user storage
//! - Validation failures as 400, everything else as a generic 500

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{Registrar, UserRepository};
use infrastructure::{
    account::{InMemoryUserRepository, PostgresUserRepository, RegistrationService},
    storage::{StorageFactory, StorageType},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    match StorageFactory::storage_type(&config.storage)? {
        StorageType::InMemory => {
            info!("Using in-memory user storage");
            Ok(build_state(Arc::new(InMemoryUserRepository::new())))
        }
        StorageType::Postgres => {
            info!("Using PostgreSQL user storage");
            let pool = StorageFactory::connect_postgres(&config.storage).await?;
            Ok(build_state(Arc::new(PostgresUserRepository::new(pool))))
        }
    }
}

/// Wire the registration service over a user store
pub fn build_state<R: UserRepository + 'static>(repository: Arc<R>) -> AppState {
    let registrar: Arc<dyn Registrar> = Arc::new(RegistrationService::new(repository.clone()));
    let users: Arc<dyn UserRepository> = repository;

    AppState::new(registrar, users)
}
