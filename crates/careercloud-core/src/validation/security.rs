//! Security rules: code 800. Logins, logon log and role grants have none.

use chrono::{DateTime, Utc};

use super::Verify;
use crate::error::RuleViolation;
use crate::types::{SecurityLogin, SecurityLoginsLog, SecurityLoginsRole, SecurityRole};

impl Verify for SecurityRole {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        if self.role.is_empty() {
            vec![RuleViolation::new(
                800,
                format!("Role for {} cannot be empty.", self.id),
            )]
        } else {
            Vec::new()
        }
    }
}

impl Verify for SecurityLogin {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        Vec::new()
    }
}

impl Verify for SecurityLoginsLog {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        Vec::new()
    }
}

impl Verify for SecurityLoginsRole {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_role_required() {
        let id = Uuid::new_v4();
        let err = SecurityRole::verify(&[SecurityRole::new(id, "")], Utc::now()).unwrap_err();
        assert_eq!(err.violations()[0].message, format!("Role for {id} cannot be empty."));
        assert!(SecurityRole::verify(&[SecurityRole::new(id, "Admin")], Utc::now()).is_ok());
    }

    #[test]
    fn test_vacuous_rule_sets_accept_anything() {
        let id = Uuid::new_v4();
        let login = SecurityLogin::new(id, "", "", "", Utc::now());
        assert!(SecurityLogin::verify(&[login], Utc::now()).is_ok());
        assert!(SecurityLoginsRole::verify(&[SecurityLoginsRole::new(id, id, id)], Utc::now()).is_ok());
    }
}
