//! # Database Pool Management
//!
//! Connection pool creation, configuration and repository hand-out.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Settings::load("appsettings.json")                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_settings ← path from DataConnection, backend choice     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← pool + migrations                        │
//! │       │                                                                 │
//! │       ├── pool ──────────► Session (shared change set)                  │
//! │       └── connect options ► StatementRepository (fresh conn per call)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.logic::<ApplicantEducation>() → Logic<_, AnyRepository<_>>          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Connection Settings
//! Every connection, pooled or not, uses WAL journaling, NORMAL synchronous
//! and enforced foreign keys.

use careercloud_core::{Logic, Verify};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{Backend, Settings};
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{AnyRepository, Navigate, Session, SessionRepository, StatementRepository};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./data/careercloud.db")
///     .backend(Backend::Statement)
///     .max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Which repository implementation `Database::repository` returns.
    /// Default: session
    pub backend: Backend,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for the database file at `path`. The file is
    /// created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            backend: Backend::default(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Builds a configuration from loaded settings.
    ///
    /// Accepts `sqlite://path`, `sqlite:path`, `Data Source=path;...` or a
    /// bare path as the connection string.
    pub fn from_settings(settings: &Settings) -> Self {
        DbConfig::new(database_path(settings.connection_string())).backend(settings.backend)
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// In-memory database for tests.
    ///
    /// sqlx gives every `:memory:` database a unique shared-cache name, so
    /// statement-backend connections opened from the same options see the
    /// pool's data for as long as the pool keeps a connection open.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            backend: Backend::default(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

/// Extracts the file path from a connection string.
fn database_path(connection: &str) -> PathBuf {
    let connection = connection.trim();

    if let Some(rest) = connection
        .split(';')
        .find_map(|part| part.trim().strip_prefix("Data Source="))
    {
        return PathBuf::from(rest.trim());
    }

    let path = connection
        .strip_prefix("sqlite://")
        .or_else(|| connection.strip_prefix("sqlite:"))
        .unwrap_or(connection);
    let path = path.split('?').next().unwrap_or(path);
    PathBuf::from(path)
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle: owns the pool and the shared session, and hands
/// out repositories for the configured backend.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    options: SqliteConnectOptions,
    session: Session,
    backend: Backend,
}

impl Database {
    /// Opens the pool and runs migrations (if enabled).
    ///
    /// ## Example
    /// ```rust,ignore
    /// let settings = Settings::load("appsettings.json")?;
    /// let db = Database::new(DbConfig::from_settings(&settings)).await?;
    /// ```
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            backend = config.backend.as_str(),
            "Initializing database connection"
        );

        // mode=rwc creates the file if it doesn't exist
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite leaves them off unless asked, per connection
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options.clone())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            session: Session::new(pool.clone()),
            pool,
            options,
            backend: config.backend,
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Called by `new()` unless disabled.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// The connection pool, for queries outside the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The shared session every session repository writes through.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Repository for `E` on the configured backend.
    pub fn repository<E: Navigate>(&self) -> AnyRepository<E> {
        match self.backend {
            Backend::Statement => AnyRepository::Statement(self.statement_repository()),
            Backend::Session => AnyRepository::Session(self.session_repository()),
        }
    }

    /// Validating front end for `E` on the configured backend.
    pub fn logic<E: Navigate + Verify>(&self) -> Logic<E, AnyRepository<E>> {
        Logic::new(self.repository())
    }

    pub fn statement_repository<E: Navigate>(&self) -> StatementRepository<E> {
        StatementRepository::new(self.options.clone())
    }

    pub fn session_repository<E: Navigate>(&self) -> SessionRepository<E> {
        SessionRepository::new(self.session.clone())
    }

    /// Closes the pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Whether the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// `(embedded, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = db.migration_status().await.unwrap();
        assert_eq!(total, applied);
        assert_eq!(db.backend(), Backend::Session);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .backend(Backend::Statement);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.backend, Backend::Statement);
    }

    #[test]
    fn test_connection_string_forms() {
        assert_eq!(database_path("sqlite://data/cc.db"), PathBuf::from("data/cc.db"));
        assert_eq!(database_path("sqlite:cc.db?mode=rwc"), PathBuf::from("cc.db"));
        assert_eq!(
            database_path("Data Source=/var/lib/cc.db;Cache=Shared"),
            PathBuf::from("/var/lib/cc.db")
        );
        assert_eq!(database_path("cc.db"), PathBuf::from("cc.db"));
    }
}
