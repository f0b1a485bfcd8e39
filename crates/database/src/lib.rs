//! Registrar Database Crate
//!
//! This crate provides database functionality for the Registrar service,
//! including connection management, migrations, and the user, role and
//! plugin-store repositories.

use registrar_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{RoleRepository, SettingsRepository, UserRepository};

pub use entities::{
    role::RoleRecord,
    user::{NewUser, UserRecord, LOCAL_PROVIDER},
};

pub use types::{errors::DatabaseError, DatabaseResult};

pub use sqlx::SqlitePool as Pool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
