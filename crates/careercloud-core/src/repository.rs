//! # Repository Contract
//!
//! One uniform CRUD + query interface per entity type. `careercloud-db`
//! provides two interchangeable implementations:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    DataRepository<E>                                    │
//! │                          │                                              │
//! │          ┌───────────────┴────────────────┐                             │
//! │          ▼                                ▼                             │
//! │  StatementRepository<E>           SessionRepository<E>                  │
//! │  one connection per call          pooled session + change set           │
//! │  per-item autocommit              one transaction per batch             │
//! │  relations never loaded           relations eager-loaded on request     │
//! │  get_filtered: NotSupported       get_filtered: pushed down             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - `update` and `remove` match by key; a key that is not stored matches
//!   zero rows and is **not** an error.
//! - Store errors are returned as-is. Nothing is retried.
//! - Navigation fields are only populated for relations named in `include`,
//!   and only by backends that support eager loading.

use async_trait::async_trait;

use crate::entity::{Entity, Relation};
use crate::filter::Filter;

/// Uniform data-access contract for entity type `E`.
#[async_trait]
pub trait DataRepository<E: Entity>: Send + Sync {
    /// Backend error type, surfaced unchanged through the logic layer.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Inserts every item.
    async fn add(&self, items: &[E]) -> Result<(), Self::Error>;

    /// Full-row replace of every item, matched by key.
    async fn update(&self, items: &[E]) -> Result<(), Self::Error>;

    /// Hard delete of every item, matched by key.
    async fn remove(&self, items: &[E]) -> Result<(), Self::Error>;

    /// Every row in store order, with the requested relations loaded.
    async fn get_all(&self, include: &[Relation]) -> Result<Vec<E>, Self::Error>;

    /// First row matching `filter`, or `None`. Never an error for "no match".
    async fn get_single(&self, filter: &Filter, include: &[Relation])
        -> Result<Option<E>, Self::Error>;

    /// Every row matching `filter`.
    async fn get_filtered(&self, filter: &Filter, include: &[Relation])
        -> Result<Vec<E>, Self::Error>;

    /// Invokes a named stored routine. Reserved; no backend implements it.
    async fn call_procedure(&self, name: &str, parameters: &[(String, String)])
        -> Result<(), Self::Error>;
}
