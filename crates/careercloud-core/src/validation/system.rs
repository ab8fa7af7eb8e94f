//! Lookup-table rules: codes 900-901 and 1000-1002.
//!
//! These two entities also verify before removal.

use chrono::{DateTime, Utc};

use super::Verify;
use crate::error::RuleViolation;
use crate::types::{SystemCountryCode, SystemLanguageCode};

impl Verify for SystemCountryCode {
    const VERIFY_ON_REMOVE: bool = true;

    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        if self.code.is_empty() {
            out.push(RuleViolation::new(900, "Country Code cannot be empty."));
        }
        if self.name.is_empty() {
            out.push(RuleViolation::new(
                901,
                format!("Country Name for {} cannot be empty.", self.code),
            ));
        }

        out
    }
}

impl Verify for SystemLanguageCode {
    const VERIFY_ON_REMOVE: bool = true;

    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        if self.language_id.is_empty() {
            out.push(RuleViolation::new(1000, "Language ID cannot be empty."));
        }
        if self.name.is_empty() {
            out.push(RuleViolation::new(
                1001,
                format!("Language Name for {} cannot be empty.", self.language_id),
            ));
        }
        if self.native_name.is_empty() {
            out.push(RuleViolation::new(
                1002,
                format!("Native Language Name for {} cannot be empty.", self.language_id),
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_rules() {
        let err = SystemCountryCode::verify(&[SystemCountryCode::new("", "")], Utc::now())
            .unwrap_err();
        assert_eq!(err.codes(), vec![900, 901]);

        let err = SystemCountryCode::verify(&[SystemCountryCode::new("CA", "")], Utc::now())
            .unwrap_err();
        assert_eq!(err.violations()[0].message, "Country Name for CA cannot be empty.");
    }

    #[test]
    fn test_language_code_rules() {
        let err = SystemLanguageCode::verify(&[SystemLanguageCode::new("FR", "", "")], Utc::now())
            .unwrap_err();
        assert_eq!(err.codes(), vec![1001, 1002]);
        assert!(SystemLanguageCode::verify(
            &[SystemLanguageCode::new("FR", "French", "Français")],
            Utc::now()
        )
        .is_ok());
    }

    #[test]
    fn test_lookups_verify_on_remove() {
        assert!(SystemCountryCode::VERIFY_ON_REMOVE);
        assert!(SystemLanguageCode::VERIFY_ON_REMOVE);
        assert!(!<crate::types::SecurityRole as Verify>::VERIFY_ON_REMOVE);
    }
}
