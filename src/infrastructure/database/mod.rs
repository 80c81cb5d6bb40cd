pub mod entities;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::config::{DatabaseSection, PoolConfig};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
    pub pool: PoolConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&DatabaseSection::default())
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        Self {
            url: section.url.clone(),
            pool: section.pool.clone(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            pool: PoolConfig::default(),
        }
    }

    /// Private in-memory SQLite database.
    ///
    /// Every pooled SQLite connection to `:memory:` opens its own empty
    /// database, so the pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            pool: PoolConfig {
                max_connections: 1,
                min_connections: 1,
                acquire_timeout_secs: 8,
            },
        }
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(self.url.clone());
        opts.max_connections(self.pool.max_connections)
            .min_connections(self.pool.min_connections)
            .acquire_timeout(Duration::from_secs(self.pool.acquire_timeout_secs))
            .sqlx_logging(false);
        opts
    }
}

/// Open the connection pool.
///
/// The returned handle owns the pool; every query checks a connection out
/// for the duration of one statement and returns it afterwards.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!(
        max_connections = config.pool.max_connections,
        "Connecting to database: {}", config.url
    );
    let db = Database::connect(config.connect_options()).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Create the `users` table when it does not exist yet.
///
/// No-op against an existing table; the statement is derived from the
/// entity definition for whichever backend `db` talks to.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entities::user::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    info!("Schema ready: users");
    Ok(())
}
