//! # Business Logic
//!
//! `Logic<E, R>` is the only write path callers should use: it runs the
//! entity's rule set and only then hands the batch to the repository.
//!
//! ## Write Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  logic.add(&items)                                                      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  E::verify(&items, Utc::now())                                          │
//! │      │                                                                  │
//! │      ├── violations ──► Err(LogicError::Validation)   repository untouched
//! │      │                                                                  │
//! │      └── clean ───────► repository.add(&items)                          │
//! │                              │                                          │
//! │                              └── Err ──► Err(LogicError::Store)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads pass straight through. `remove` skips verification except for the
//! lookup tables (`Verify::VERIFY_ON_REMOVE`).

use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use tracing::debug;

use crate::entity::Entity;
use crate::error::{LogicError, LogicResult};
use crate::filter::{Filter, Value};
use crate::repository::DataRepository;
use crate::validation::Verify;

/// Validation gate in front of a `DataRepository<E>`.
#[derive(Debug, Clone)]
pub struct Logic<E, R> {
    repository: R,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> Logic<E, R>
where
    E: Entity + Verify,
    R: DataRepository<E>,
{
    pub fn new(repository: R) -> Self {
        Logic {
            repository,
            _entity: PhantomData,
        }
    }

    /// The wrapped repository, for reads that need relations.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Runs the rule set against `now` without touching the store.
    pub fn verify(&self, items: &[E], now: DateTime<Utc>) -> LogicResult<(), R::Error> {
        E::verify(items, now).map_err(|errors| {
            debug!(entity = E::NAME, violations = errors.len(), "Batch rejected");
            LogicError::Validation(errors)
        })
    }

    /// Verifies, then inserts the whole batch.
    pub async fn add(&self, items: &[E]) -> LogicResult<(), R::Error> {
        self.verify(items, Utc::now())?;
        self.repository.add(items).await.map_err(LogicError::Store)
    }

    /// Verifies, then replaces every item by key.
    pub async fn update(&self, items: &[E]) -> LogicResult<(), R::Error> {
        self.verify(items, Utc::now())?;
        self.repository.update(items).await.map_err(LogicError::Store)
    }

    /// Deletes every item by key.
    pub async fn remove(&self, items: &[E]) -> LogicResult<(), R::Error> {
        if E::VERIFY_ON_REMOVE {
            self.verify(items, Utc::now())?;
        }
        self.repository.remove(items).await.map_err(LogicError::Store)
    }

    /// Looks up one row by its key column (id, or natural code).
    pub async fn get(&self, key: impl Into<Value>) -> LogicResult<Option<E>, R::Error> {
        let filter = Filter::eq(E::KEY_COLUMN, key);
        self.repository
            .get_single(&filter, &[])
            .await
            .map_err(LogicError::Store)
    }

    pub async fn get_all(&self) -> LogicResult<Vec<E>, R::Error> {
        self.repository.get_all(&[]).await.map_err(LogicError::Store)
    }

    pub async fn get_filtered(&self, filter: &Filter) -> LogicResult<Vec<E>, R::Error> {
        self.repository
            .get_filtered(filter, &[])
            .await
            .map_err(LogicError::Store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Relation;
    use crate::types::{ApplicantEducation, CompanyProfile, SecurityRole, SystemCountryCode};
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::Mutex;
    use thiserror::Error;
    use uuid::Uuid;

    #[derive(Debug, Error)]
    #[error("memory store refused the write")]
    struct MemoryError;

    /// Keeps rows in a Vec and answers filters with `Filter::evaluate`.
    struct MemoryRepository<E> {
        rows: Mutex<Vec<E>>,
        writes: Mutex<usize>,
        fail_writes: bool,
    }

    impl<E: Entity> MemoryRepository<E> {
        fn new() -> Self {
            MemoryRepository {
                rows: Mutex::new(Vec::new()),
                writes: Mutex::new(0),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            MemoryRepository {
                fail_writes: true,
                ..Self::new()
            }
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        fn record_write(&self) -> Result<(), MemoryError> {
            *self.writes.lock().unwrap() += 1;
            if self.fail_writes {
                Err(MemoryError)
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl<E: Entity> DataRepository<E> for MemoryRepository<E> {
        type Error = MemoryError;

        async fn add(&self, items: &[E]) -> Result<(), MemoryError> {
            self.record_write()?;
            self.rows.lock().unwrap().extend_from_slice(items);
            Ok(())
        }

        async fn update(&self, items: &[E]) -> Result<(), MemoryError> {
            self.record_write()?;
            let mut rows = self.rows.lock().unwrap();
            for item in items {
                if let Some(row) = rows.iter_mut().find(|r| r.key() == item.key()) {
                    *row = item.clone();
                }
            }
            Ok(())
        }

        async fn remove(&self, items: &[E]) -> Result<(), MemoryError> {
            self.record_write()?;
            self.rows
                .lock()
                .unwrap()
                .retain(|row| !items.iter().any(|i| i.key() == row.key()));
            Ok(())
        }

        async fn get_all(&self, _include: &[Relation]) -> Result<Vec<E>, MemoryError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn get_single(
            &self,
            filter: &Filter,
            _include: &[Relation],
        ) -> Result<Option<E>, MemoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| filter.evaluate(&row.column_values()))
                .cloned())
        }

        async fn get_filtered(
            &self,
            filter: &Filter,
            _include: &[Relation],
        ) -> Result<Vec<E>, MemoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| filter.evaluate(&row.column_values()))
                .cloned()
                .collect())
        }

        async fn call_procedure(
            &self,
            _name: &str,
            _parameters: &[(String, String)],
        ) -> Result<(), MemoryError> {
            Err(MemoryError)
        }
    }

    fn education(major: &str) -> ApplicantEducation {
        ApplicantEducation {
            major: Some(major.to_string()),
            start_date: Some(Utc::now() - Duration::days(365)),
            ..ApplicantEducation::new(Uuid::new_v4(), Uuid::new_v4())
        }
    }

    #[tokio::test]
    async fn test_invalid_batch_never_reaches_repository() {
        let logic = Logic::new(MemoryRepository::<ApplicantEducation>::new());
        let batch = [education("Computer Science"), education("AI")];

        let err = logic.add(&batch).await.unwrap_err();
        assert_eq!(err.validation().unwrap().codes(), vec![107]);
        assert_eq!(logic.repository().writes(), 0);
        assert!(logic.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_valid_batch_is_persisted_and_readable() {
        let logic = Logic::new(MemoryRepository::<ApplicantEducation>::new());
        let item = education("Computer Science");
        logic.add(&[item.clone()]).await.unwrap();

        let found = logic.get(item.id).await.unwrap();
        assert_eq!(found, Some(item.clone()));

        let mut changed = item.clone();
        changed.major = Some("Mathematics".into());
        logic.update(&[changed.clone()]).await.unwrap();
        let filtered = logic
            .get_filtered(&Filter::eq("major", "Mathematics"))
            .await
            .unwrap();
        assert_eq!(filtered, vec![changed]);
    }

    #[tokio::test]
    async fn test_update_is_verified_too() {
        let logic = Logic::new(MemoryRepository::<ApplicantEducation>::new());
        let mut item = education("Computer Science");
        logic.add(&[item.clone()]).await.unwrap();

        item.start_date = Some(Utc::now() + Duration::days(2));
        let err = logic.update(&[item]).await.unwrap_err();
        assert_eq!(err.validation().unwrap().codes(), vec![108]);
        assert_eq!(logic.repository().writes(), 1);
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let logic = Logic::new(MemoryRepository::<SecurityRole>::failing());
        let err = logic
            .add(&[SecurityRole::new(Uuid::new_v4(), "Admin")])
            .await
            .unwrap_err();
        assert!(err.store().is_some());
        assert_eq!(err.to_string(), "memory store refused the write");
    }

    #[tokio::test]
    async fn test_remove_skips_rules_except_for_lookups() {
        // An invalid role can still be deleted.
        let roles = Logic::new(MemoryRepository::<SecurityRole>::new());
        roles.remove(&[SecurityRole::new(Uuid::new_v4(), "")]).await.unwrap();
        assert_eq!(roles.repository().writes(), 1);

        // An invalid country code cannot.
        let countries = Logic::new(MemoryRepository::<SystemCountryCode>::new());
        let err = countries
            .remove(&[SystemCountryCode::new("CA", "")])
            .await
            .unwrap_err();
        assert_eq!(err.validation().unwrap().codes(), vec![901]);
        assert_eq!(countries.repository().writes(), 0);
    }

    #[tokio::test]
    async fn test_get_by_natural_key() {
        let countries = Logic::new(MemoryRepository::<SystemCountryCode>::new());
        countries
            .add(&[SystemCountryCode::new("CA", "Canada"), SystemCountryCode::new("US", "United States")])
            .await
            .unwrap();

        let us = countries.get("US").await.unwrap().unwrap();
        assert_eq!(us.name, "United States");
        assert!(countries.get("MX").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_phone_scenario() {
        let logic = Logic::new(MemoryRepository::<CompanyProfile>::new());
        let profile = CompanyProfile {
            company_website: Some("www.acme.com".into()),
            contact_phone: Some("4165551234".into()),
            ..CompanyProfile::new(Uuid::new_v4(), Utc::now())
        };
        let err = logic.add(&[profile]).await.unwrap_err();
        assert_eq!(err.validation().unwrap().codes(), vec![601]);
    }
}
