//! # careercloud-db: Database Layer for CareerCloud
//!
//! SQLite storage for the CareerCloud records, through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CareerCloud Data Flow                            │
//! │                                                                         │
//! │  Caller (REST layer, admin UI, seed binary)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Logic<E, R> (careercloud-core) ── rule set ── reject or forward        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  careercloud-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐   ┌──────────────────┐   ┌──────────────┐    │   │
//! │  │   │  Database   │   │  Repositories    │   │  Migrations  │    │   │
//! │  │   │  (pool.rs)  │──►│  statement.rs    │   │  (embedded)  │    │   │
//! │  │   │             │   │  session.rs      │   │              │    │   │
//! │  │   │  Settings   │   │  relations.rs    │   │ 001_init.sql │    │   │
//! │  │   └─────────────┘   └──────────────────┘   └──────────────┘    │   │
//! │  │                            │                                    │   │
//! │  │                            ▼                                    │   │
//! │  │                     sql.rs (statement builder)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (path from appsettings.json)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `appsettings.json` loading and backend selection
//! - [`pool`] - Connection pool creation and repository hand-out
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Statement and session backends, eager loading
//! - [`sql`] - Parameterized statement builder
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use careercloud_core::{ApplicantEducation, DataRepository, Filter, Relation};
//! use careercloud_db::{Database, DbConfig, Settings};
//!
//! let settings = Settings::load("appsettings.json")?;
//! let db = Database::new(DbConfig::from_settings(&settings)).await?;
//!
//! let educations = db.logic::<ApplicantEducation>();
//! educations.add(&[education]).await?;
//!
//! let with_profiles = educations
//!     .repository()
//!     .get_filtered(&Filter::eq("major", "Computer Science"), &[Relation::ApplicantProfile])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sql;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Backend, ConfigError, Settings};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{
    AnyRepository, EntityState, Navigate, PendingChange, Record, Session, SessionRepository,
    StatementRepository,
};
