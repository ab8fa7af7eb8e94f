//! Company-side records: profile, localized descriptions, locations, and
//! the jobs a company posts with their descriptions, education and skill
//! requirements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::entity::{Entity, Relation, TimeStamp};
use crate::filter::Value;
use crate::types::{ApplicantJobApplication, SystemCountryCode, SystemLanguageCode};

// =============================================================================
// Company Profile
// =============================================================================

/// A registered company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyProfile {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub registration_date: DateTime<Utc>,
    /// Must end in `.ca`, `.com` or `.biz` (rule 600).
    pub company_website: Option<String>,
    /// `NNN-NNN-NNNN` (rule 601).
    pub contact_phone: Option<String>,
    pub contact_name: Option<String>,
    pub company_logo: Option<Vec<u8>>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_jobs: Option<Vec<CompanyJob>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_descriptions: Option<Vec<CompanyDescription>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_locations: Option<Vec<CompanyLocation>>,
}

impl CompanyProfile {
    pub fn new(id: Uuid, registration_date: DateTime<Utc>) -> Self {
        CompanyProfile {
            id,
            registration_date,
            ..Default::default()
        }
    }
}

impl Entity for CompanyProfile {
    const NAME: &'static str = "CompanyProfile";
    const TABLE: &'static str = "company_profiles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "registration_date",
        "company_website",
        "contact_phone",
        "contact_name",
        "company_logo",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[
        Relation::CompanyJobs,
        Relation::CompanyDescriptions,
        Relation::CompanyLocations,
    ];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("registration_date", self.registration_date.into()),
            ("company_website", self.company_website.clone().into()),
            ("contact_phone", self.contact_phone.clone().into()),
            ("contact_name", self.contact_name.clone().into()),
            ("company_logo", self.company_logo.clone().into()),
        ]
    }
}

// =============================================================================
// Company Description
// =============================================================================

/// Company name and blurb in one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyDescription {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub company: Uuid,
    /// `SystemLanguageCode.language_id`.
    pub language_id: String,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_profile: Option<Box<CompanyProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub system_language_code: Option<Box<SystemLanguageCode>>,
}

impl CompanyDescription {
    pub fn new(id: Uuid, company: Uuid, language_id: impl Into<String>) -> Self {
        CompanyDescription {
            id,
            company,
            language_id: language_id.into(),
            ..Default::default()
        }
    }
}

impl Entity for CompanyDescription {
    const NAME: &'static str = "CompanyDescription";
    const TABLE: &'static str = "company_descriptions";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company",
        "language_id",
        "company_name",
        "company_description",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] =
        &[Relation::CompanyProfile, Relation::SystemLanguageCode];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("company", self.company.into()),
            ("language_id", self.language_id.clone().into()),
            ("company_name", self.company_name.clone().into()),
            ("company_description", self.company_description.clone().into()),
        ]
    }
}

// =============================================================================
// Company Location
// =============================================================================

/// A company office address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyLocation {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub company: Uuid,
    /// `SystemCountryCode.code`.
    pub country_code: Option<String>,
    pub province: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_profile: Option<Box<CompanyProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub system_country_code: Option<Box<SystemCountryCode>>,
}

impl CompanyLocation {
    pub fn new(id: Uuid, company: Uuid) -> Self {
        CompanyLocation {
            id,
            company,
            ..Default::default()
        }
    }
}

impl Entity for CompanyLocation {
    const NAME: &'static str = "CompanyLocation";
    const TABLE: &'static str = "company_locations";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company",
        "country_code",
        "province",
        "street",
        "city",
        "postal_code",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] =
        &[Relation::CompanyProfile, Relation::SystemCountryCode];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("company", self.company.into()),
            ("country_code", self.country_code.clone().into()),
            ("province", self.province.clone().into()),
            ("street", self.street.clone().into()),
            ("city", self.city.clone().into()),
            ("postal_code", self.postal_code.clone().into()),
        ]
    }
}

// =============================================================================
// Company Job
// =============================================================================

/// A job posting. `is_inactive` is advisory; rows are never soft-deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyJob {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub company: Uuid,
    #[ts(as = "String")]
    pub profile_created: DateTime<Utc>,
    pub is_inactive: bool,
    pub is_company_hidden: bool,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_profile: Option<Box<CompanyProfile>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job_educations: Option<Vec<CompanyJobEducation>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job_descriptions: Option<Vec<CompanyJobDescription>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub applicant_job_applications: Option<Vec<ApplicantJobApplication>>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job_skills: Option<Vec<CompanyJobSkill>>,
}

impl CompanyJob {
    pub fn new(id: Uuid, company: Uuid, profile_created: DateTime<Utc>) -> Self {
        CompanyJob {
            id,
            company,
            profile_created,
            ..Default::default()
        }
    }
}

impl Entity for CompanyJob {
    const NAME: &'static str = "CompanyJob";
    const TABLE: &'static str = "company_jobs";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company",
        "profile_created",
        "is_inactive",
        "is_company_hidden",
    ];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[
        Relation::CompanyProfile,
        Relation::CompanyJobEducations,
        Relation::CompanyJobDescriptions,
        Relation::ApplicantJobApplications,
        Relation::CompanyJobSkills,
    ];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("company", self.company.into()),
            ("profile_created", self.profile_created.into()),
            ("is_inactive", self.is_inactive.into()),
            ("is_company_hidden", self.is_company_hidden.into()),
        ]
    }
}

// =============================================================================
// Company Job Description
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyJobDescription {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub job: Uuid,
    pub job_name: Option<String>,
    pub job_descriptions: Option<String>,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job: Option<Box<CompanyJob>>,
}

impl CompanyJobDescription {
    pub fn new(id: Uuid, job: Uuid) -> Self {
        CompanyJobDescription {
            id,
            job,
            ..Default::default()
        }
    }
}

impl Entity for CompanyJobDescription {
    const NAME: &'static str = "CompanyJobDescription";
    const TABLE: &'static str = "company_job_descriptions";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "job", "job_name", "job_descriptions"];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::CompanyJob];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("job", self.job.into()),
            ("job_name", self.job_name.clone().into()),
            ("job_descriptions", self.job_descriptions.clone().into()),
        ]
    }
}

// =============================================================================
// Company Job Education
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyJobEducation {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub job: Uuid,
    pub major: Option<String>,
    pub importance: i16,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job: Option<Box<CompanyJob>>,
}

impl CompanyJobEducation {
    pub fn new(id: Uuid, job: Uuid) -> Self {
        CompanyJobEducation {
            id,
            job,
            ..Default::default()
        }
    }
}

impl Entity for CompanyJobEducation {
    const NAME: &'static str = "CompanyJobEducation";
    const TABLE: &'static str = "company_job_educations";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "job", "major", "importance"];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::CompanyJob];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("job", self.job.into()),
            ("major", self.major.clone().into()),
            ("importance", self.importance.into()),
        ]
    }
}

// =============================================================================
// Company Job Skill
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyJobSkill {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub job: Uuid,
    pub skill: String,
    pub skill_level: String,
    pub importance: i32,
    #[ts(as = "Option<String>")]
    pub time_stamp: Option<TimeStamp>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(skip)]
    pub company_job: Option<Box<CompanyJob>>,
}

impl CompanyJobSkill {
    pub fn new(
        id: Uuid,
        job: Uuid,
        skill: impl Into<String>,
        skill_level: impl Into<String>,
    ) -> Self {
        CompanyJobSkill {
            id,
            job,
            skill: skill.into(),
            skill_level: skill_level.into(),
            ..Default::default()
        }
    }
}

impl Entity for CompanyJobSkill {
    const NAME: &'static str = "CompanyJobSkill";
    const TABLE: &'static str = "company_job_skills";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "job", "skill", "skill_level", "importance"];
    const HAS_TIME_STAMP: bool = true;
    const RELATIONS: &'static [Relation] = &[Relation::CompanyJob];

    fn key(&self) -> Value {
        self.id.into()
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("job", self.job.into()),
            ("skill", self.skill.clone().into()),
            ("skill_level", self.skill_level.clone().into()),
            ("importance", self.importance.into()),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
