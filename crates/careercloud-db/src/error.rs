//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds categorization                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LogicError::Store(DbError) ← Passed through unchanged                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  REST boundary ──► toast in the admin UI                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `NotSupported`, `UnknownColumn` and `UnknownRelation` are raised before
//! any SQL runs; they are permanent for a given call, never transient.

use careercloud_core::Relation;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique / primary key constraint violation.
    ///
    /// ## When This Occurs
    /// - Adding a row whose id is already stored
    /// - Adding a country or language code twice
    #[error("Duplicate {field}: {message}")]
    UniqueViolation { field: String, message: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Adding an education for an applicant that does not exist
    /// - Removing a profile that still has children
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A session batch could not be started or committed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The backend deliberately does not implement this operation.
    #[error("{operation} is not supported by the {backend} backend")]
    NotSupported {
        operation: &'static str,
        backend: &'static str,
    },

    /// A filter named a column the entity does not have.
    #[error("{entity} has no column '{column}'")]
    UnknownColumn { entity: &'static str, column: String },

    /// An include named a relation the entity does not declare.
    #[error("{entity} has no relation '{relation}'")]
    UnknownRelation {
        entity: &'static str,
        relation: Relation,
    },

    /// A value could not be bound as a statement argument.
    #[error("Failed to encode argument: {0}")]
    Encode(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_supported(operation: &'static str, backend: &'static str) -> Self {
        DbError::NotSupported { operation, backend }
    }

    pub fn unknown_column(entity: &'static str, column: impl Into<String>) -> Self {
        DbError::UnknownColumn {
            entity,
            column: column.into(),
        }
    }

    pub fn unknown_relation(entity: &'static str, relation: Relation) -> Self {
        DbError::UnknownRelation { entity, relation }
    }

    /// Whether retrying the same call can never succeed.
    pub fn is_capability_gap(&self) -> bool {
        matches!(
            self,
            DbError::NotSupported { .. }
                | DbError::UnknownColumn { .. }
                | DbError::UnknownRelation { .. }
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::Encode         → DbError::Encode
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite error messages for constraints:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        message: msg.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(io) => DbError::ConnectionFailed(io.to_string()),

            sqlx::Error::Encode(e) => DbError::Encode(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
