//! Applicant-side records: profile plus the education, skills, work
//! history, resumes and job applications hanging off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::entity::{Entity, Relation, TimeStamp};
use crate::filter::Value;
use crate::money::Money;
use crate::types::{CompanyJob, SecurityLogin, SystemCountryCode};

// =============================================================================
// Applicant Profile
// =============================================================================

/// An applicant's profile, owned by one security login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantProfile {
    #[ts(as = "String")]
    pub id: Uuid,

    /// Owning `SecurityLogin`.
    #[ts(as = "String")]
    pub login: Uuid,

    /// Minor units; negative values are rejected by rule 111.
    pub current_salary: Option<Money>,

    /// Minor units; negative values are rejected by rule 112.
    pub current_rate: Option<Money>,

    pub currency: Option<String>,

    /// `SystemCountryCode.code`.
    pub country: Option<String>,
    pub province: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,

    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub security_login: Option<Box<SecurityLogin>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub system_country_code: Option<Box<SystemCountryCode>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_educations: Option<Vec<ApplicantEducation>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_job_applications: Option<Vec<ApplicantJobApplication>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_resumes: Option<Vec<ApplicantResume>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_skills: Option<Vec<ApplicantSkill>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_work_histories: Option<Vec<ApplicantWorkHistory>>,
}

impl ApplicantProfile {
    pub fn new(id: Uuid, login: Uuid) -> Self {
        ApplicantProfile {
            id,
            login,
            ..Default::default()
        }
    }
}

impl Entity for ApplicantProfile {
    const NAME: &'static str = "ApplicantProfile";
    const TABLE: &'static str = "applicant_profiles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "login",
        "current_salary",
        "current_rate",
        "currency",
        "country",
        "province",
        "street",
        "city",
        "postal_code",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[
        Relation::SecurityLogin,
        Relation::SystemCountryCode,
        Relation::ApplicantEducations,
        Relation::ApplicantJobApplications,
        Relation::ApplicantResumes,
        Relation::ApplicantSkills,
        Relation::ApplicantWorkHistories,
    ];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("login", self.login.into()),
            ("current_salary", self.current_salary.into()),
            ("current_rate", self.current_rate.into()),
            ("currency", self.currency.clone().into()),
            ("country", self.country.clone().into()),
            ("province", self.province.clone().into()),
            ("street", self.street.clone().into()),
            ("city", self.city.clone().into()),
            ("postal_code", self.postal_code.clone().into()),
        ]
    }
}

// =============================================================================
// Applicant Education
// =============================================================================

/// A degree, diploma or certificate an applicant holds or is working on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantEducation {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub applicant: Uuid,
    pub major: Option<String>,
    pub certificate_diploma: Option<String>,
    #[ts(as = "Option<String>")]
    pub start_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub completion_date: Option<DateTime<Utc>>,
    pub completion_percent: Option<u8>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profile: Option<Box<ApplicantProfile>>,
}

impl ApplicantEducation {
    pub fn new(id: Uuid, applicant: Uuid) -> Self {
        ApplicantEducation {
            id,
            applicant,
            ..Default::default()
        }
    }
}

impl Entity for ApplicantEducation {
    const NAME: &'static str = "ApplicantEducation";
    const TABLE: &'static str = "applicant_educations";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "applicant",
        "major",
        "certificate_diploma",
        "start_date",
        "completion_date",
        "completion_percent",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::ApplicantProfile];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("applicant", self.applicant.into()),
            ("major", self.major.clone().into()),
            ("certificate_diploma", self.certificate_diploma.clone().into()),
            ("start_date", self.start_date.into()),
            ("completion_date", self.completion_date.into()),
            ("completion_percent", self.completion_percent.into()),
        ]
    }
}

// =============================================================================
// Applicant Job Application
// =============================================================================

/// An applicant applying to a company job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantJobApplication {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub applicant: Uuid,
    #[ts(as = "String")]
    pub job: Uuid,
    #[ts(as = "String")]
    pub application_date: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profile: Option<Box<ApplicantProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job: Option<Box<CompanyJob>>,
}

impl ApplicantJobApplication {
    pub fn new(id: Uuid, applicant: Uuid, job: Uuid, application_date: DateTime<Utc>) -> Self {
        ApplicantJobApplication {
            id,
            applicant,
            job,
            application_date,
            ..Default::default()
        }
    }
}

impl Entity for ApplicantJobApplication {
    const NAME: &'static str = "ApplicantJobApplication";
    const TABLE: &'static str = "applicant_job_applications";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "applicant", "job", "application_date"];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::ApplicantProfile, Relation::CompanyJob];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("applicant", self.applicant.into()),
            ("job", self.job.into()),
            ("application_date", self.application_date.into()),
        ]
    }
}

// =============================================================================
// Applicant Resume
// =============================================================================

/// Free-text resume. No time stamp on this table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantResume {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub applicant: Uuid,
    pub resume: Option<String>,
    #[ts(as = "Option<String>")]
    pub last_updated: Option<DateTime<Utc>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profile: Option<Box<ApplicantProfile>>,
}

impl ApplicantResume {
    pub fn new(id: Uuid, applicant: Uuid, resume: impl Into<String>) -> Self {
        ApplicantResume {
            id,
            applicant,
            resume: Some(resume.into()),
            ..Default::default()
        }
    }
}

impl Entity for ApplicantResume {
    const NAME: &'static str = "ApplicantResume";
    const TABLE: &'static str = "applicant_resumes";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "applicant", "resume", "last_updated"];
    const HAS_TIME_STAMP: bool = false;
    const RELATIONS: &'static [Relation] = &[Relation::ApplicantProfile];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("applicant", self.applicant.into()),
            ("resume", self.resume.clone().into()),
            ("last_updated", self.last_updated.into()),
        ]
    }
}

// =============================================================================
// Applicant Skill
// =============================================================================

/// A skill with the month/year span it was practised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantSkill {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub applicant: Uuid,
    pub skill: String,
    pub skill_level: String,
    pub start_month: u8,
    pub start_year: i32,
    pub end_month: u8,
    pub end_year: i32,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profile: Option<Box<ApplicantProfile>>,
}

impl ApplicantSkill {
    pub fn new(
        id: Uuid,
        applicant: Uuid,
        skill: impl Into<String>,
        skill_level: impl Into<String>,
    ) -> Self {
        ApplicantSkill {
            id,
            applicant,
            skill: skill.into(),
            skill_level: skill_level.into(),
            ..Default::default()
        }
    }

    /// Sets the start and end of the span, as (month, year) pairs.
    pub fn with_period(mut self, start: (u8, i32), end: (u8, i32)) -> Self {
        (self.start_month, self.start_year) = start;
        (self.end_month, self.end_year) = end;
        self
    }
}

impl Entity for ApplicantSkill {
    const NAME: &'static str = "ApplicantSkill";
    const TABLE: &'static str = "applicant_skills";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "applicant",
        "skill",
        "skill_level",
        "start_month",
        "start_year",
        "end_month",
        "end_year",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::ApplicantProfile];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("applicant", self.applicant.into()),
            ("skill", self.skill.clone().into()),
            ("skill_level", self.skill_level.clone().into()),
            ("start_month", self.start_month.into()),
            ("start_year", self.start_year.into()),
            ("end_month", self.end_month.into()),
            ("end_year", self.end_year.into()),
        ]
    }
}

// =============================================================================
// Applicant Work History
// =============================================================================

/// A past position held by an applicant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantWorkHistory {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub applicant: Uuid,
    pub company_name: String,
    /// `SystemCountryCode.code`.
    pub country_code: String,
    pub location: String,
    pub job_title: String,
    pub job_description: String,
    pub start_month: i16,
    pub start_year: i32,
    pub end_month: i16,
    pub end_year: i32,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_profile: Option<Box<ApplicantProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub system_country_code: Option<Box<SystemCountryCode>>,
}

impl ApplicantWorkHistory {
    pub fn new(
        id: Uuid,
        applicant: Uuid,
        company_name: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        ApplicantWorkHistory {
            id,
            applicant,
            company_name: company_name.into(),
            country_code: country_code.into(),
            ..Default::default()
        }
    }
}

impl Entity for ApplicantWorkHistory {
    const NAME: &'static str = "ApplicantWorkHistory";
    const TABLE: &'static str = "applicant_work_history";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "applicant",
        "company_name",
        "country_code",
        "location",
        "job_title",
        "job_description",
        "start_month",
        "start_year",
        "end_month",
        "end_year",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] =
        &[Relation::ApplicantProfile, Relation::SystemCountryCode];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("applicant", self.applicant.into()),
            ("company_name", self.company_name.clone().into()),
            ("country_code", self.country_code.clone().into()),
            ("location", self.location.clone().into()),
            ("job_title", self.job_title.clone().into()),
            ("job_description", self.job_description.clone().into()),
            ("start_month", self.start_month.into()),
            ("start_year", self.start_year.into()),
            ("end_month", self.end_month.into()),
            ("end_year", self.end_year.into()),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::drift::assert_columns_match;

    #[test]
    fn test_column_mapping_matches_declared_columns() {
        let (id, owner) = (Uuid::new_v4(), Uuid::new_v4());
        assert_columns_match(&ApplicantProfile::new(id, owner));
        assert_columns_match(&ApplicantEducation::new(id, owner));
        assert_columns_match(&ApplicantJobApplication::new(id, owner, owner, Utc::now()));
        assert_columns_match(&ApplicantResume::new(id, owner, "resume"));
        assert_columns_match(&ApplicantSkill::new(id, owner, "Rust", "Expert"));
        assert_columns_match(&ApplicantWorkHistory::new(id, owner, "Acme", "CA"));
    }

    #[test]
    fn test_money_columns_bind_as_minor_units() {
        let mut profile = ApplicantProfile::new(Uuid::new_v4(), Uuid::new_v4());
        profile.current_salary = Some(Money::from_major_minor(85_000, 10));
        let values = profile.column_values();
        assert_eq!(values[2], ("current_salary", Value::Int(8_500_010)));
        assert_eq!(values[3], ("current_rate", Value::Null));
    }

    #[test]
    fn test_json_is_camel_case_without_unloaded_relations() {
        let education = ApplicantEducation {
            major: Some("Computer Science".into()),
            time_stamp: Some(TimeStamp::from_bytes(vec![0xab, 0x01])),
            ..ApplicantEducation::new(Uuid::nil(), Uuid::nil())
        };
        let json = serde_json::to_value(&education).unwrap();
        assert_eq!(json["major"], "Computer Science");
        assert_eq!(json["certificateDiploma"], serde_json::Value::Null);
        assert_eq!(json["timeStamp"], "ab01");
        assert!(json.get("applicantProfile").is_none());
    }

    #[test]
    fn test_skill_period_builder() {
        let skill = ApplicantSkill::new(Uuid::new_v4(), Uuid::new_v4(), "SQL", "Intermediate")
            .with_period((3, 2015), (11, 2020));
        assert_eq!((skill.start_month, skill.start_year), (3, 2015));
        assert_eq!((skill.end_month, skill.end_year), (11, 2020));
    }
}
