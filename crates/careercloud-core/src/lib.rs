//! # careercloud-core: Domain Layer for CareerCloud
//!
//! Entities, predicates, the repository contract, and the validation gate
//! that sits in front of every write. Zero I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CareerCloud Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                React admin UI  ──►  REST API                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ careercloud-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │ validation│  │   logic   │  │   │
//! │  │   │ Applicant │  │  Filter   │  │   rules   │  │  Logic<E> │  │   │
//! │  │   │ Company.. │  │  Value    │  │  verify() │  │ add/update│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                       │        │   │
//! │  │                          DataRepository<E> (trait) ◄──┘        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                careercloud-db (Database Layer)                  │   │
//! │  │          statement backend  •  session backend  •  SQLite       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The nineteen entity records (applicants, companies, security, system)
//! - [`entity`] - `Entity` metadata trait, `Relation`, `TimeStamp`
//! - [`filter`] - `Value` and the `Filter` predicate model
//! - [`repository`] - The `DataRepository` contract both backends implement
//! - [`validation`] - Per-entity rule sets producing coded violations
//! - [`logic`] - `Logic<E, R>`: verify, then delegate to the repository
//! - [`money`] - Integer money for salary / rate columns
//! - [`error`] - Validation and logic error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use careercloud_core::types::ApplicantEducation;
//! use careercloud_core::validation::Verify;
//! use uuid::Uuid;
//!
//! let mut education = ApplicantEducation::new(Uuid::new_v4(), Uuid::new_v4());
//! education.major = Some("AI".to_string());
//! education.start_date = Some(Utc::now() + Duration::days(1));
//!
//! let err = ApplicantEducation::verify(&[education], Utc::now()).unwrap_err();
//! assert_eq!(err.codes(), vec![107, 108]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entity;
pub mod error;
pub mod filter;
pub mod logic;
pub mod money;
pub mod repository;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use entity::{Entity, Relation, TimeStamp};
pub use error::{LogicError, RuleViolation, ValidationErrors};
pub use filter::{Filter, Value};
pub use logic::Logic;
pub use money::Money;
pub use repository::DataRepository;
pub use types::*;
pub use validation::Verify;
