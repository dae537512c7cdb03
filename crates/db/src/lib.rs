//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{CostCenterRepository, FiscalRepository, RateRepository};

use std::time::Duration;

use hesab_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.as_str());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10));

    Database::connect(options).await
}
