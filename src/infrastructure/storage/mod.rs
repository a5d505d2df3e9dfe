//! Storage infrastructure - connection pooling, backend selection and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{StorageFactory, StorageType};
pub use migrations::{account_migrations, run_account_migrations, Migration, PostgresMigrator};
pub use postgres::PostgresConfig;
