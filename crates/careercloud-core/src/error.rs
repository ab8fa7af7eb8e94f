//! # Error Types
//!
//! Domain-specific error types for careercloud-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  careercloud-core errors (this file)                                   │
//! │  ├── RuleViolation     - One (code, message) pair                      │
//! │  ├── ValidationErrors  - Every violation found in a batch              │
//! │  └── LogicError<S>     - Validation failure OR store failure           │
//! │                                                                         │
//! │  careercloud-db errors (separate crate)                                │
//! │  └── DbError           - Database operation failures (the `S` above)   │
//! │                                                                         │
//! │  Flow: RuleViolation* → ValidationErrors → LogicError → REST → Toast   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule Codes
//! Codes are an opaque, globally assigned taxonomy grouped loosely by
//! entity (1xx applicants, 2xx-6xx company, 8xx security, 9xx/10xx system).
//! They are not sequential and one code (107) is shared by two entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Rule Violation
// =============================================================================

/// A single business-rule violation: numeric rule code plus human message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("[{code}] {message}")]
pub struct RuleViolation {
    /// Rule code (e.g. 601 = contact phone format).
    pub code: u32,

    /// Message suitable for a toast in the admin UI.
    pub message: String,
}

impl RuleViolation {
    /// Creates a violation for the given rule code.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        RuleViolation {
            code,
            message: message.into(),
        }
    }
}

// =============================================================================
// Validation Errors (aggregate)
// =============================================================================

/// All violations collected from one `verify` pass over a batch.
///
/// Never empty: construct through [`ValidationErrors::from_violations`],
/// which yields `None` when there is nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<RuleViolation>);

impl ValidationErrors {
    /// Wraps the collected violations, or returns `None` if there are none.
    pub fn from_violations(violations: Vec<RuleViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(ValidationErrors(violations))
        }
    }

    /// The individual violations, in the order they were found.
    pub fn violations(&self) -> &[RuleViolation] {
        &self.0
    }

    /// Just the rule codes, in order (duplicates preserved).
    pub fn codes(&self) -> Vec<u32> {
        self.0.iter().map(|v| v.code).collect()
    }

    /// Whether any violation carries the given code.
    pub fn contains(&self, code: u32) -> bool {
        self.0.iter().any(|v| v.code == code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for violation in &self.0 {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = RuleViolation;
    type IntoIter = std::vec::IntoIter<RuleViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Logic Error
// =============================================================================

/// Errors surfaced by the business-logic layer.
///
/// ## When This Occurs
/// ```text
/// Logic::add(items)
///      │
///      ├── verify() found violations ──► LogicError::Validation (nothing persisted)
///      │
///      └── repository.add() failed ────► LogicError::Store (store error, verbatim)
/// ```
#[derive(Debug, Error)]
pub enum LogicError<S>
where
    S: std::error::Error + 'static,
{
    /// One or more business rules failed. Recoverable: fix input, resubmit.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The storage backend failed. Propagated unchanged.
    #[error(transparent)]
    Store(S),
}

impl<S> LogicError<S>
where
    S: std::error::Error + 'static,
{
    /// Returns the validation errors, if this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            LogicError::Validation(errors) => Some(errors),
            LogicError::Store(_) => None,
        }
    }

    /// Returns the store error, if this is a store failure.
    pub fn store(&self) -> Option<&S> {
        match self {
            LogicError::Validation(_) => None,
            LogicError::Store(err) => Some(err),
        }
    }
}

/// Convenience type alias for logic-layer results.
pub type LogicResult<T, S> = Result<T, LogicError<S>>;

// =============================================================================
// Unit Tests
// =============================================================================
