//! # Session Backend
//!
//! A long-lived [`Session`] shared by every entity's repository. Writes are
//! recorded as pending changes and flushed together by `save_changes`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  repo.add(&[a, b, c])                                                   │
//! │      │                                                                  │
//! │      ▼  lock change set                                                 │
//! │  mark Added a, b, c                                                     │
//! │      │                                                                  │
//! │      ▼  save_changes                                                    │
//! │  BEGIN ── INSERT a ── INSERT b ── INSERT c ──┬── ok ──► COMMIT          │
//! │                                              └── err ─► ROLLBACK        │
//! │      │                                                                  │
//! │      ▼  change set cleared either way                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The change set lives behind a `tokio::sync::Mutex`, so concurrent batches
//! on one session are serialized: a batch never flushes another caller's
//! half-marked changes.

use async_trait::async_trait;
use careercloud_core::{DataRepository, Entity, Filter, Relation, Value};
use sqlx::SqlitePool;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{execute, fetch_all, fetch_optional, Navigate};
use crate::error::{DbError, DbResult};
use crate::sql::{self, Statement};

pub(crate) const BACKEND: &str = "session";

/// What `save_changes` will do with a tracked row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
}

/// One tracked write, already rendered to SQL.
#[derive(Debug, Clone)]
pub struct PendingChange {
    pub entity: &'static str,
    pub state: EntityState,
    pub key: Value,
    pub statement: Statement,
}

impl PendingChange {
    pub fn new<E: Entity>(state: EntityState, item: &E) -> Self {
        let statement = match state {
            EntityState::Added => sql::insert(E::TABLE, item.column_values(), E::HAS_TIME_STAMP),
            EntityState::Modified => sql::update(
                E::TABLE,
                E::KEY_COLUMN,
                item.column_values(),
                E::HAS_TIME_STAMP,
            ),
            EntityState::Deleted => sql::delete(E::TABLE, E::KEY_COLUMN, item.key()),
        };

        PendingChange {
            entity: E::NAME,
            state,
            key: item.key(),
            statement,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Pooled unit of work shared across repositories.
#[derive(Debug, Clone)]
pub struct Session {
    pool: SqlitePool,
    changes: Arc<Mutex<Vec<PendingChange>>>,
}

impl Session {
    pub fn new(pool: SqlitePool) -> Self {
        Session {
            pool,
            changes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Tracks `items` in the given state without touching the store.
    pub async fn mark<E: Entity>(&self, state: EntityState, items: &[E]) {
        let mut changes = self.changes.lock().await;
        changes.extend(items.iter().map(|item| PendingChange::new(state, item)));
    }

    /// Number of tracked, unsaved changes.
    pub async fn pending(&self) -> usize {
        self.changes.lock().await.len()
    }

    /// Flushes every tracked change in one transaction.
    ///
    /// Returns the total rows affected. The change set is empty afterwards,
    /// whether the transaction committed or rolled back.
    pub async fn save_changes(&self) -> DbResult<u64> {
        let mut changes = self.changes.lock().await;
        Self::flush(&self.pool, &mut changes).await
    }

    /// Marks and saves under one lock, so the batch is flushed alone.
    pub(crate) async fn mark_and_save<E: Entity>(
        &self,
        state: EntityState,
        items: &[E],
    ) -> DbResult<u64> {
        let mut changes = self.changes.lock().await;
        changes.extend(items.iter().map(|item| PendingChange::new(state, item)));
        Self::flush(&self.pool, &mut changes).await
    }

    async fn flush(pool: &SqlitePool, changes: &mut Vec<PendingChange>) -> DbResult<u64> {
        let batch = std::mem::take(changes);
        if batch.is_empty() {
            return Ok(0);
        }

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut affected = 0;
        for change in &batch {
            // Dropping `tx` on error rolls the whole batch back
            let rows = execute(&mut *tx, &change.statement).await.map_err(|e| {
                warn!(entity = change.entity, state = ?change.state, key = ?change.key, error = %e, "Batch rolled back");
                e
            })?;
            if rows == 0 {
                debug!(entity = change.entity, state = ?change.state, key = ?change.key, "No row matched");
            }
            affected += rows;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(changes = batch.len(), affected, "Session changes saved");
        Ok(affected)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// `DataRepository<E>` over a shared [`Session`].
#[derive(Debug, Clone)]
pub struct SessionRepository<E> {
    session: Session,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Navigate> SessionRepository<E> {
    pub fn new(session: Session) -> Self {
        SessionRepository {
            session,
            _entity: PhantomData,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn check_relations(include: &[Relation]) -> DbResult<()> {
        match include.iter().find(|relation| !E::supports(**relation)) {
            Some(relation) => Err(DbError::unknown_relation(E::NAME, *relation)),
            None => Ok(()),
        }
    }

    async fn load(&self, rows: &mut [E], include: &[Relation]) -> DbResult<()> {
        for relation in include {
            E::include(self.session.pool(), rows, *relation).await?;
        }
        Ok(())
    }

    async fn write(&self, state: EntityState, items: &[E]) -> DbResult<()> {
        let affected = self.session.mark_and_save(state, items).await?;
        debug!(entity = E::NAME, ?state, count = items.len(), affected, "Batch saved");
        Ok(())
    }
}

#[async_trait]
impl<E: Navigate> DataRepository<E> for SessionRepository<E> {
    type Error = DbError;

    async fn add(&self, items: &[E]) -> DbResult<()> {
        self.write(EntityState::Added, items).await
    }

    async fn update(&self, items: &[E]) -> DbResult<()> {
        self.write(EntityState::Modified, items).await
    }

    async fn remove(&self, items: &[E]) -> DbResult<()> {
        self.write(EntityState::Deleted, items).await
    }

    async fn get_all(&self, include: &[Relation]) -> DbResult<Vec<E>> {
        Self::check_relations(include)?;

        let statement = sql::select::<E>(None, None)?;
        let mut rows: Vec<E> = fetch_all(self.session.pool(), &statement).await?;
        self.load(&mut rows, include).await?;
        Ok(rows)
    }

    async fn get_single(&self, filter: &Filter, include: &[Relation]) -> DbResult<Option<E>> {
        Self::check_relations(include)?;

        let statement = sql::select::<E>(Some(filter), Some(1))?;
        let row: Option<E> = fetch_optional(self.session.pool(), &statement).await?;
        match row {
            Some(row) => {
                let mut rows = vec![row];
                self.load(&mut rows, include).await?;
                Ok(rows.pop())
            }
            None => Ok(None),
        }
    }

    async fn get_filtered(&self, filter: &Filter, include: &[Relation]) -> DbResult<Vec<E>> {
        Self::check_relations(include)?;

        let statement = sql::select::<E>(Some(filter), None)?;
        let mut rows: Vec<E> = fetch_all(self.session.pool(), &statement).await?;
        self.load(&mut rows, include).await?;
        Ok(rows)
    }

    async fn call_procedure(&self, name: &str, _parameters: &[(String, String)]) -> DbResult<()> {
        warn!(entity = E::NAME, procedure = name, "Stored routines are not supported");
        Err(DbError::not_supported("call_procedure", BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careercloud_core::SystemCountryCode;

    #[test]
    fn test_pending_change_renders_by_state() {
        let country = SystemCountryCode::new("CA", "Canada");

        let added = PendingChange::new(EntityState::Added, &country);
        assert!(added.statement.sql.starts_with(r#"INSERT INTO "system_country_codes""#));

        let deleted = PendingChange::new(EntityState::Deleted, &country);
        assert_eq!(
            deleted.statement.sql,
            r#"DELETE FROM "system_country_codes" WHERE "code" = ?"#
        );
        assert_eq!(deleted.key, Value::Text("CA".into()));
        assert_eq!(deleted.entity, "SystemCountryCode");
    }
}
