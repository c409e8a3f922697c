//! Database settings and pool wiring shared by the server and tooling.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

/// Shared connection handle; sea-orm multiplexes a sqlx pool underneath.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing; set {0}")]
    MissingUrl(String),
    #[error(transparent)]
    Connect(#[from] DbErr),
}

/// Environment-driven settings for the database connection.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: "DATABASE_URL".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn database_url(&self) -> Result<String, DbError> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

/// Connect to the configured database and return the shared pool.
pub async fn connect(settings: &DatabaseSettings) -> Result<DbPool, DbError> {
    let url = settings.database_url()?;
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    info!(max_connections = settings.max_connections, "database pool ready");
    Ok(pool)
}
