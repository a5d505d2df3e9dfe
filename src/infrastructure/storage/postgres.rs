//! PostgreSQL connection pooling

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::StorageSettings;
use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/comics".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// Build from the storage section of the application config
    ///
    /// `DATABASE_URL`, when set, wins over `storage.url`.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .or_else(|| settings.url.clone())
            .ok_or_else(|| {
                DomainError::configuration(
                    "PostgreSQL storage requires storage.url or DATABASE_URL",
                )
            })?;

        Ok(Self::new(url)
            .with_max_connections(settings.max_connections)
            .with_min_connections(settings.min_connections)
            .with_connect_timeout(settings.connect_timeout_secs)
            .with_idle_timeout(settings.idle_timeout_secs))
    }

    /// Open a connection pool
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        info!(
            max_connections = self.max_connections,
            min_connections = self.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        info!("PostgreSQL connection established");

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, 600);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://db/comics")
            .with_max_connections(20)
            .with_min_connections(5)
            .with_connect_timeout(60)
            .with_idle_timeout(1200);

        assert_eq!(config.url, "postgres://db/comics");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.connect_timeout_secs, 60);
        assert_eq!(config.idle_timeout_secs, 1200);
    }

    #[test]
    fn test_from_settings_uses_pool_sizes() {
        let settings = StorageSettings {
            url: Some("postgres://settings/comics".to_string()),
            max_connections: 3,
            min_connections: 0,
            ..Default::default()
        };

        let config = PostgresConfig::from_settings(&settings).unwrap();

        assert_eq!(config.max_connections, 3);
        assert_eq!(config.min_connections, 0);
    }
}
