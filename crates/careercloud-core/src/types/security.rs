//! Security records: logins, their logon history, and role grants.
//!
//! Passwords are stored as given. Authentication is outside this system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::entity::{Entity, Relation, TimeStamp};
use crate::filter::Value;
use crate::types::ApplicantProfile;

// =============================================================================
// Security Login
// =============================================================================

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SecurityLogin {
    #[ts(as = "String")]
    pub id: Uuid,
    /// Account name.
    pub login: String,
    pub password: String,
    #[ts(as = "String")]
    pub created: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub password_update: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub agreement_accepted: Option<DateTime<Utc>>,
    pub is_locked: bool,
    pub is_inactive: bool,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
    pub force_change_password: bool,
    pub preferred_language: Option<String>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profiles: Option<Vec<ApplicantProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_logins_logs: Option<Vec<SecurityLoginsLog>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_logins_roles: Option<Vec<SecurityLoginsRole>>,
}

impl SecurityLogin {
    pub fn new(
        id: Uuid,
        login: impl Into<String>,
        password: impl Into<String>,
        email_address: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        SecurityLogin {
            id,
            login: login.into(),
            password: password.into(),
            email_address: email_address.into(),
            created,
            ..Default::default()
        }
    }
}

impl Entity for SecurityLogin {
    const NAME: &'static str = "SecurityLogin";
    const TABLE: &'static str = "security_logins";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "login",
        "password",
        "created",
        "password_update",
        "agreement_accepted",
        "is_locked",
        "is_inactive",
        "email_address",
        "phone_number",
        "full_name",
        "force_change_password",
        "preferred_language",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[
        Relation::ApplicantProfiles,
        Relation::SecurityLoginsLogs,
        Relation::SecurityLoginsRoles,
    ];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("login", self.login.clone().into()),
            ("password", self.password.clone().into()),
            ("created", self.created.into()),
            ("password_update", self.password_update.into()),
            ("agreement_accepted", self.agreement_accepted.into()),
            ("is_locked", self.is_locked.into()),
            ("is_inactive", self.is_inactive.into()),
            ("email_address", self.email_address.clone().into()),
            ("phone_number", self.phone_number.clone().into()),
            ("full_name", self.full_name.clone().into()),
            ("force_change_password", self.force_change_password.into()),
            ("preferred_language", self.preferred_language.clone().into()),
        ]
    }
}

// =============================================================================
// Security Logins Log
// =============================================================================

/// One logon attempt. Append-only, no time stamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SecurityLoginsLog {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub login: Uuid,
    pub source_ip: String,
    #[ts(as = "String")]
    pub logon_date: DateTime<Utc>,
    pub is_successful: bool,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_login: Option<Box<SecurityLogin>>,
}

impl SecurityLoginsLog {
    pub fn new(
        id: Uuid,
        login: Uuid,
        source_ip: impl Into<String>,
        logon_date: DateTime<Utc>,
        is_successful: bool,
    ) -> Self {
        SecurityLoginsLog {
            id,
            login,
            source_ip: source_ip.into(),
            logon_date,
            is_successful,
            security_login: None,
        }
    }
}

impl Entity for SecurityLoginsLog {
    const NAME: &'static str = "SecurityLoginsLog";
    const TABLE: &'static str = "security_logins_log";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["id", "login", "source_ip", "logon_date", "is_successful"];
    const HAS_TIME_STAMP: bool = false;
    const RELATIONS: &'static [Relation] = &[Relation::SecurityLogin];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("login", self.login.into()),
            ("source_ip", self.source_ip.clone().into()),
            ("logon_date", self.logon_date.into()),
            ("is_successful", self.is_successful.into()),
        ]
    }
}

// =============================================================================
// Security Role / Logins Role
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SecurityRole {
    #[ts(as = "String")]
    pub id: Uuid,
    pub role: String,
    pub is_inactive: bool,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_logins_roles: Option<Vec<SecurityLoginsRole>>,
}

impl SecurityRole {
    pub fn new(id: Uuid, role: impl Into<String>) -> Self {
        SecurityRole {
            id,
            role: role.into(),
            ..Default::default()
        }
    }
}

impl Entity for SecurityRole {
    const NAME: &'static str = "SecurityRole";
    const TABLE: &'static str = "security_roles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "role", "is_inactive"];
    const HAS_TIME_STAMP: bool = false;
    const RELATIONS: &'static [Relation] = &[Relation::SecurityLoginsRoles];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("role", self.role.clone().into()),
            ("is_inactive", self.is_inactive.into()),
        ]
    }
}

/// Grants a role to a login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SecurityLoginsRole {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub login: Uuid,
    #[ts(as = "String")]
    pub role: Uuid,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_login: Option<Box<SecurityLogin>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_role: Option<Box<SecurityRole>>,
}

impl SecurityLoginsRole {
    pub fn new(id: Uuid, login: Uuid, role: Uuid) -> Self {
        SecurityLoginsRole {
            id,
            login,
            role,
            ..Default::default()
        }
    }
}

impl Entity for SecurityLoginsRole {
    const NAME: &'static str = "SecurityLoginsRole";
    const TABLE: &'static str = "security_logins_roles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "login", "role"];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::SecurityLogin, Relation::SecurityRole];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("login", self.login.into()),
            ("role", self.role.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::drift::assert_columns_match;

    #[test]
    fn test_column_mapping_matches_declared_columns() {
        let id = Uuid::new_v4();
        assert_columns_match(&SecurityLogin::new(id, "jdoe", "secret", "j@x.ca", Utc::now()));
        assert_columns_match(&SecurityLoginsLog::new(id, id, "10.0.0.1", Utc::now(), true));
        assert_columns_match(&SecurityRole::new(id, "Administrator"));
        assert_columns_match(&SecurityLoginsRole::new(id, id, id));
    }
}
