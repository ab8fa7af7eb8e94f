//! Lookup tables keyed by natural code instead of a generated id.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entity::{Entity, Relation};
use crate::filter::Value;
use crate::types::{ApplicantProfile, ApplicantWorkHistory, CompanyDescription};

/// A country, keyed by its code (e.g. "CA").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SystemCountryCode {
    pub code: String,
    pub name: String,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profiles: Option<Vec<ApplicantProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_work_histories: Option<Vec<ApplicantWorkHistory>>,
}

impl SystemCountryCode {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        SystemCountryCode {
            code: code.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for SystemCountryCode {
    const NAME: &'static str = "SystemCountryCode";
    const TABLE: &'static str = "system_country_codes";
    const KEY_COLUMN: &'static str = "code";
    const COLUMNS: &'static [&'static str] = &["code", "name"];
    const HAS_TIME_STAMP: bool = false;
    const RELATIONS: &'static [Relation] =
        &[Relation::ApplicantProfiles, Relation::ApplicantWorkHistories];

    fn key(&self) -> Value {
        self.code.clone().into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("code", self.code.clone().into()),
            ("name", self.name.clone().into()),
        ]
    }
}

/// A language, keyed by its id (e.g. "EN").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SystemLanguageCode {
    pub language_id: String,
    pub name: String,
    pub native_name: String,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_descriptions: Option<Vec<CompanyDescription>>,
}

impl SystemLanguageCode {
    pub fn new(
        language_id: impl Into<String>,
        name: impl Into<String>,
        native_name: impl Into<String>,
    ) -> Self {
        SystemLanguageCode {
            language_id: language_id.into(),
            name: name.into(),
            native_name: native_name.into(),
            company_descriptions: None,
        }
    }
}

impl Entity for SystemLanguageCode {
    const NAME: &'static str = "SystemLanguageCode";
    const TABLE: &'static str = "system_language_codes";
    const KEY_COLUMN: &'static str = "language_id";
    const COLUMNS: &'static [&'static str] = &["language_id", "name", "native_name"];
    const HAS_TIME_STAMP: bool = false;
    const RELATIONS: &'static [Relation] = &[Relation::CompanyDescriptions];

    fn key(&self) -> Value {
        self.language_id.clone().into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("language_id", self.language_id.clone().into()),
            ("name", self.name.clone().into()),
            ("native_name", self.native_name.clone().into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::drift::assert_columns_match;

    #[test]
    fn test_natural_keys() {
        let canada = SystemCountryCode::new("CA", "Canada");
        assert_eq!(canada.key(), Value::Text("CA".into()));
        assert_columns_match(&canada);

        let french = SystemLanguageCode::new("FR", "French", "Français");
        assert_eq!(SystemLanguageCode::KEY_COLUMN, "language_id");
        assert_columns_match(&french);
    }
}
