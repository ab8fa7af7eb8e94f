//! # Statement Backend
//!
//! Hand-built parameterized SQL over a short-lived connection.
//!
//! ## Per-Call Lifecycle
//! ```text
//! add(&[a, b, c])
//!   │
//!   ├── connect (fresh connection, same options as the pool)
//!   ├── INSERT a   ── autocommit
//!   ├── INSERT b   ── autocommit
//!   ├── INSERT c   ── fails ──► Err, a and b stay written
//!   └── close (also on error: the connection is dropped)
//! ```
//!
//! Relations are never loaded. Only `get_single` accepts a filter; general
//! filtered reads and stored routines report `NotSupported`.

use async_trait::async_trait;
use careercloud_core::{DataRepository, Filter, Relation};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::marker::PhantomData;
use tracing::{debug, warn};

use super::{execute, fetch_all, fetch_optional, Record};
use crate::error::{DbError, DbResult};
use crate::sql::{self, Statement};

pub(crate) const BACKEND: &str = "statement";

/// Stateless repository: every call opens and closes its own connection.
#[derive(Debug, Clone)]
pub struct StatementRepository<E> {
    options: SqliteConnectOptions,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Record> StatementRepository<E> {
    /// Creates a repository that connects with `options` on every call.
    pub fn new(options: SqliteConnectOptions) -> Self {
        StatementRepository {
            options,
            _entity: PhantomData,
        }
    }

    async fn connect(&self) -> DbResult<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }

    /// Runs one statement per item, each in its own implicit transaction.
    async fn write_each(
        &self,
        operation: &'static str,
        items: &[E],
        build: fn(&E) -> Statement,
    ) -> DbResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut conn = self.connect().await?;
        for item in items {
            let affected = execute(&mut conn, &build(item)).await?;
            if affected == 0 {
                debug!(entity = E::NAME, operation, key = ?item.key(), "No row matched");
            }
        }
        conn.close().await?;

        debug!(entity = E::NAME, operation, count = items.len(), "Batch written");
        Ok(())
    }
}

fn insert_statement<E: Record>(item: &E) -> Statement {
    sql::insert(E::TABLE, item.column_values(), E::HAS_TIME_STAMP)
}

fn update_statement<E: Record>(item: &E) -> Statement {
    sql::update(E::TABLE, E::KEY_COLUMN, item.column_values(), E::HAS_TIME_STAMP)
}

fn delete_statement<E: Record>(item: &E) -> Statement {
    sql::delete(E::TABLE, E::KEY_COLUMN, item.key())
}

#[async_trait]
impl<E: Record> DataRepository<E> for StatementRepository<E> {
    type Error = DbError;

    async fn add(&self, items: &[E]) -> DbResult<()> {
        self.write_each("add", items, insert_statement::<E>).await
    }

    async fn update(&self, items: &[E]) -> DbResult<()> {
        self.write_each("update", items, update_statement::<E>).await
    }

    async fn remove(&self, items: &[E]) -> DbResult<()> {
        self.write_each("remove", items, delete_statement::<E>).await
    }

    async fn get_all(&self, include: &[Relation]) -> DbResult<Vec<E>> {
        if !include.is_empty() {
            debug!(entity = E::NAME, ?include, "Relations are not loaded by this backend");
        }

        let statement = sql::select::<E>(None, None)?;
        let mut conn = self.connect().await?;
        let rows = fetch_all(&mut conn, &statement).await?;
        conn.close().await?;
        Ok(rows)
    }

    async fn get_single(&self, filter: &Filter, include: &[Relation]) -> DbResult<Option<E>> {
        if !include.is_empty() {
            debug!(entity = E::NAME, ?include, "Relations are not loaded by this backend");
        }

        let statement = sql::select::<E>(Some(filter), Some(1))?;
        let mut conn = self.connect().await?;
        let row = fetch_optional(&mut conn, &statement).await?;
        conn.close().await?;
        Ok(row)
    }

    async fn get_filtered(&self, _filter: &Filter, _include: &[Relation]) -> DbResult<Vec<E>> {
        warn!(entity = E::NAME, "get_filtered called on the statement backend");
        Err(DbError::not_supported("get_filtered", BACKEND))
    }

    async fn call_procedure(&self, name: &str, _parameters: &[(String, String)]) -> DbResult<()> {
        warn!(entity = E::NAME, procedure = name, "Stored routines are not supported");
        Err(DbError::not_supported("call_procedure", BACKEND))
    }
}
