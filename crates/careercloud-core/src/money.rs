//! # Money Module
//!
//! Provides the `Money` type used for applicant salary and rate columns.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A salary typed as 85000.10 in the admin UI must come back as          │
//! │  85000.10, not 85000.09999999.                                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    85000.10 is stored as 8500010                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The currency itself lives next to the amount (`ApplicantProfile.currency`),
//! so `Money` is currency-agnostic and assumes two decimal places.
//!
//! ## Usage
//! ```rust
//! use careercloud_core::money::Money;
//!
//! let salary = Money::from_major_minor(85_000, 10);
//! assert_eq!(salary.minor(), 8_500_010);
//! assert_eq!(salary.to_string(), "85000.10");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in minor units (cents for CAD/USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so that the
///   validation layer can reject them with a coded violation (rules 111/112)
///   instead of failing at deserialization
/// - **Single field tuple struct**: zero-cost wrapper, stored as INTEGER
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use careercloud_core::money::Money;
    ///
    /// let rate = Money::from_minor(4550); // 45.50 per hour
    /// assert_eq!(rate.minor(), 4550);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, no currency symbol (the UI owns localization).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).minor(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).minor(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(8_500_010).to_string(), "85000.10");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_sign() {
        assert!(Money::from_minor(-1).is_negative());
        assert!(Money::from_major_minor(-5, 50).is_negative());
        assert!(!Money::zero().is_negative());
        assert!(!Money::from_minor(1500).is_negative());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_minor(4550)).unwrap();
        assert_eq!(json, "4550");
    }
}
