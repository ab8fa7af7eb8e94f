//! # Validation Module
//!
//! Per-entity business rules, checked before every add and update.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin UI (TypeScript)                                        │
//! │  └── Form-level checks, immediate feedback                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Logic<E> (Rust)                                              │
//! │  └── THIS MODULE: coded business rules, every violation collected      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / PRIMARY KEY constraints                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - A rule set is a pure function of `(item, now)`. No shared state.
//! - Every rule runs on every item; violations are never short-circuited
//!   across rules or across items.
//! - One field yields at most one violation (the "missing" message wins
//!   over the "too short" message).
//! - Date rules with a missing operand do not fire.
//!
//! ## Usage
//! ```rust
//! use chrono::Utc;
//! use careercloud_core::types::CompanyProfile;
//! use careercloud_core::validation::Verify;
//! use uuid::Uuid;
//!
//! let mut profile = CompanyProfile::new(Uuid::new_v4(), Utc::now());
//! profile.company_website = Some("www.careercloud.ca".into());
//! profile.contact_phone = Some("4165551234".into());
//!
//! let err = CompanyProfile::verify(&[profile], Utc::now()).unwrap_err();
//! assert_eq!(err.codes(), vec![601]);
//! ```

mod applicant;
mod company;
mod security;
mod system;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RuleViolation, ValidationErrors};

// =============================================================================
// Verify Trait
// =============================================================================

/// An entity's rule set.
pub trait Verify: Sized {
    /// Whether `Logic::remove` also verifies before deleting.
    ///
    /// Only the natural-key lookup tables do this.
    const VERIFY_ON_REMOVE: bool = false;

    /// Every rule this single item breaks, in rule order.
    fn violations(&self, now: DateTime<Utc>) -> Vec<RuleViolation>;

    /// Checks a whole batch, collecting violations from every item.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use careercloud_core::types::SecurityRole;
    /// use careercloud_core::validation::Verify;
    /// use uuid::Uuid;
    ///
    /// let roles = [SecurityRole::new(Uuid::new_v4(), ""), SecurityRole::new(Uuid::new_v4(), "")];
    /// assert_eq!(SecurityRole::verify(&roles, Utc::now()).unwrap_err().codes(), vec![800, 800]);
    /// ```
    fn verify(items: &[Self], now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let violations: Vec<RuleViolation> =
            items.iter().flat_map(|item| item.violations(now)).collect();

        match ValidationErrors::from_violations(violations) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Rule Primitives
// =============================================================================

/// `^\d{3}-\d{3}-\d{4}$`, e.g. 416-555-1234.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("phone pattern is valid"));

/// Optional scheme, optional `www.`, then a name ending in .ca, .biz or .com.
static WEBSITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(?:(http)?s?://)?(www.)?([a-z0-9!]+\-?[a-z0-9!]+)+\.(ca|biz|com)\z")
        .expect("website pattern is valid")
});

/// Null or empty. Whitespace counts as content.
pub(crate) fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Required text with a minimum length: one violation at most.
pub(crate) fn required_min_len(
    value: Option<&str>,
    min: usize,
    code: u32,
    missing: impl FnOnce() -> String,
    too_short: impl FnOnce() -> String,
) -> Option<RuleViolation> {
    match value {
        None | Some("") => Some(RuleViolation::new(code, missing())),
        Some(text) if char_len(text) < min => Some(RuleViolation::new(code, too_short())),
        Some(_) => None,
    }
}

/// `Some(later) > Some(earlier)`; absent operands never compare.
pub(crate) fn is_after(later: Option<DateTime<Utc>>, earlier: Option<DateTime<Utc>>) -> bool {
    matches!((later, earlier), (Some(a), Some(b)) if a > b)
}

pub(crate) fn is_phone_number(value: &str) -> bool {
    PHONE.is_match(value)
}

pub(crate) fn is_allowed_website(value: &str) -> bool {
    WEBSITE.is_match(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(is_phone_number("416-555-1234"));
        assert!(!is_phone_number("4165551234"));
        assert!(!is_phone_number("416-555-12345"));
        assert!(!is_phone_number("(416) 555-1234"));
    }

    #[test]
    fn test_website_pattern() {
        for ok in [
            "careercloud.ca",
            "www.careercloud.com",
            "http://www.careercloud.biz",
            "https://career-cloud.com",
        ] {
            assert!(is_allowed_website(ok), "{ok} should be allowed");
        }
        for bad in ["www.careercloud.org", "careercloud.cam", "ftp://x.ca", "c.ca"] {
            assert!(!is_allowed_website(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_required_min_len_prefers_missing_message() {
        let missing = || "missing".to_string();
        let short = || "short".to_string();

        let v = required_min_len(None, 3, 107, missing, short).unwrap();
        assert_eq!(v.message, "missing");
        let v = required_min_len(Some(""), 3, 107, missing, short).unwrap();
        assert_eq!(v.message, "missing");
        let v = required_min_len(Some("AI"), 3, 107, missing, short).unwrap();
        assert_eq!(v.message, "short");
        assert!(required_min_len(Some("Art"), 3, 107, missing, short).is_none());
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("Éco"), 3);
        assert!(!is_missing(Some(" ")));
        assert!(is_missing(None));
    }

    #[test]
    fn test_is_after_ignores_missing_operands() {
        let now = Utc::now();
        assert!(!is_after(None, Some(now)));
        assert!(!is_after(Some(now), None));
        assert!(!is_after(Some(now), Some(now)));
        assert!(is_after(Some(now + chrono::Duration::seconds(1)), Some(now)));
    }
}
