//! Storage factory for runtime storage selection

use sqlx::PgPool;
use tracing::info;

use crate::config::StorageSettings;
use crate::domain::DomainError;

use super::migrations::run_account_migrations;
use super::postgres::PostgresConfig;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Factory for storage connections
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Resolve the configured backend
    pub fn storage_type(settings: &StorageSettings) -> Result<StorageType, DomainError> {
        StorageType::from_str(&settings.backend).ok_or_else(|| {
            DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                settings.backend
            ))
        })
    }

    /// Connect to PostgreSQL, applying migrations when configured to
    pub async fn connect_postgres(settings: &StorageSettings) -> Result<PgPool, DomainError> {
        let pool = PostgresConfig::from_settings(settings)?.connect().await?;

        if settings.run_migrations {
            let applied = run_account_migrations(&pool).await?;
            info!(applied, "Storage migrations checked");
        }

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(
            StorageType::from_str("memory"),
            Some(StorageType::InMemory)
        );
        assert_eq!(
            StorageType::from_str("In-Memory"),
            Some(StorageType::InMemory)
        );
        assert_eq!(
            StorageType::from_str("postgres"),
            Some(StorageType::Postgres)
        );
        assert_eq!(
            StorageType::from_str("postgresql"),
            Some(StorageType::Postgres)
        );
        assert_eq!(StorageType::from_str("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("unknown"), None);
    }

    #[test]
    fn test_unknown_backend_is_a_configuration_error() {
        let settings = StorageSettings {
            backend: "sqlserver".to_string(),
            ..Default::default()
        };

        let result = StorageFactory::storage_type(&settings);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_default_backend_is_in_memory() {
        let settings = StorageSettings::default();
        assert_eq!(
            StorageFactory::storage_type(&settings).unwrap(),
            StorageType::InMemory
        );
    }
}
