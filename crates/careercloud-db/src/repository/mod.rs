//! # Repository Backends
//!
//! Two implementations of [`DataRepository`], chosen once at startup from
//! `Settings::backend`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database::repository::<E>()                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AnyRepository<E>                                                       │
//! │   ├── Statement(StatementRepository<E>)                                 │
//! │   │     fresh connection per call, autocommit per item                  │
//! │   │                                                                     │
//! │   └── Session(SessionRepository<E>)                                     │
//! │         shared Session ──► change set ──► one transaction per save      │
//! │         reads push filters into SQL, then eager-load relations          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers hold `Logic<E, AnyRepository<E>>` and never see which one runs.

pub mod relations;
pub mod session;
pub mod statement;

use async_trait::async_trait;
use careercloud_core::{DataRepository, Entity, Filter, Relation};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite};

use crate::error::{DbError, DbResult};
use crate::sql::Statement;

pub use relations::Navigate;
pub use session::{EntityState, PendingChange, Session, SessionRepository};
pub use statement::StatementRepository;

/// An entity that can be read back from a SQLite row by column name.
pub trait Record: Entity + for<'r> FromRow<'r, SqliteRow> {}

impl<T> Record for T where T: Entity + for<'r> FromRow<'r, SqliteRow> {}

// =============================================================================
// Shared Execution Helpers
// =============================================================================

pub(crate) async fn fetch_all<'c, E, X>(executor: X, statement: &Statement) -> DbResult<Vec<E>>
where
    E: Record,
    X: sqlx::Executor<'c, Database = Sqlite>,
{
    let arguments = statement.arguments()?;
    let rows = sqlx::query_as_with::<_, E, _>(&statement.sql, arguments)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub(crate) async fn fetch_optional<'c, E, X>(
    executor: X,
    statement: &Statement,
) -> DbResult<Option<E>>
where
    E: Record,
    X: sqlx::Executor<'c, Database = Sqlite>,
{
    let arguments = statement.arguments()?;
    let row = sqlx::query_as_with::<_, E, _>(&statement.sql, arguments)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Runs a write and returns the number of rows it touched.
pub(crate) async fn execute<'c, X>(executor: X, statement: &Statement) -> DbResult<u64>
where
    X: sqlx::Executor<'c, Database = Sqlite>,
{
    let arguments = statement.arguments()?;
    let result = sqlx::query_with(&statement.sql, arguments)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

// =============================================================================
// Backend Dispatch
// =============================================================================

/// The configured backend for entity `E`.
#[derive(Debug, Clone)]
pub enum AnyRepository<E> {
    Statement(StatementRepository<E>),
    Session(SessionRepository<E>),
}

impl<E: Navigate> AnyRepository<E> {
    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyRepository::Statement(_) => statement::BACKEND,
            AnyRepository::Session(_) => session::BACKEND,
        }
    }
}

#[async_trait]
impl<E: Navigate> DataRepository<E> for AnyRepository<E> {
    type Error = DbError;

    async fn add(&self, items: &[E]) -> DbResult<()> {
        match self {
            AnyRepository::Statement(repo) => repo.add(items).await,
            AnyRepository::Session(repo) => repo.add(items).await,
        }
    }

    async fn update(&self, items: &[E]) -> DbResult<()> {
        match self {
            AnyRepository::Statement(repo) => repo.update(items).await,
            AnyRepository::Session(repo) => repo.update(items).await,
        }
    }

    async fn remove(&self, items: &[E]) -> DbResult<()> {
        match self {
            AnyRepository::Statement(repo) => repo.remove(items).await,
            AnyRepository::Session(repo) => repo.remove(items).await,
        }
    }

    async fn get_all(&self, include: &[Relation]) -> DbResult<Vec<E>> {
        match self {
            AnyRepository::Statement(repo) => repo.get_all(include).await,
            AnyRepository::Session(repo) => repo.get_all(include).await,
        }
    }

    async fn get_single(&self, filter: &Filter, include: &[Relation]) -> DbResult<Option<E>> {
        match self {
            AnyRepository::Statement(repo) => repo.get_single(filter, include).await,
            AnyRepository::Session(repo) => repo.get_single(filter, include).await,
        }
    }

    async fn get_filtered(&self, filter: &Filter, include: &[Relation]) -> DbResult<Vec<E>> {
        match self {
            AnyRepository::Statement(repo) => repo.get_filtered(filter, include).await,
            AnyRepository::Session(repo) => repo.get_filtered(filter, include).await,
        }
    }

    async fn call_procedure(&self, name: &str, parameters: &[(String, String)]) -> DbResult<()> {
        match self {
            AnyRepository::Statement(repo) => repo.call_procedure(name, parameters).await,
            AnyRepository::Session(repo) => repo.call_procedure(name, parameters).await,
        }
    }
}
