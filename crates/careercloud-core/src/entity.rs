//! # Entity Metadata
//!
//! Every record type describes its own table shape through [`Entity`], so
//! that both storage backends can build statements by column *name*.
//!
//! ## Named-Column Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Entity::COLUMNS        ["id", "applicant", "major", ...]               │
//! │        │                                                                │
//! │        ├──► SELECT list           (reads map back via FromRow, by name) │
//! │        ├──► filter column check   (unknown column never reaches SQL)    │
//! │        │                                                                │
//! │  Entity::column_values()  [("id", Uuid), ("applicant", Uuid), ...]      │
//! │        └──► INSERT / UPDATE       (column and value travel together)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no ordinal anywhere: reordering a struct's fields or a table's
//! columns cannot silently shift values between columns.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::filter::Value;

// =============================================================================
// Entity Trait
// =============================================================================

/// Table metadata plus the write-side column mapping for one record type.
pub trait Entity: Clone + fmt::Debug + Send + Sync + Unpin + 'static {
    /// Display name used in logs and errors (e.g. "ApplicantEducation").
    const NAME: &'static str;

    /// Table name in the store.
    const TABLE: &'static str;

    /// Primary-key column. Either a generated `id` or a natural code.
    const KEY_COLUMN: &'static str;

    /// Persisted columns (key first), excluding `time_stamp`.
    const COLUMNS: &'static [&'static str];

    /// Whether the table carries a store-assigned `time_stamp` token.
    const HAS_TIME_STAMP: bool;

    /// Navigation properties eager loading can populate.
    const RELATIONS: &'static [Relation];

    /// The primary key as a bindable value.
    fn key(&self) -> Value;

    /// Every persisted column paired with its current value, in
    /// `COLUMNS` order.
    fn column_values(&self) -> Vec<(&'static str, Value)>;

    /// Whether `relation` is declared for this entity.
    fn supports(relation: Relation) -> bool {
        Self::RELATIONS.contains(&relation)
    }

    /// Whether `column` is a filterable column of this entity.
    fn has_column(column: &str) -> bool {
        Self::COLUMNS.contains(&column) || (Self::HAS_TIME_STAMP && column == "time_stamp")
    }
}

// =============================================================================
// Relations
// =============================================================================

/// A named navigation property.
///
/// Singular names point at the parent row referenced by a foreign key;
/// plural names are child collections that reference this row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    ApplicantProfile,
    ApplicantProfiles,
    ApplicantEducations,
    ApplicantJobApplications,
    ApplicantResumes,
    ApplicantSkills,
    ApplicantWorkHistories,
    CompanyProfile,
    CompanyDescriptions,
    CompanyLocations,
    CompanyJob,
    CompanyJobs,
    CompanyJobDescriptions,
    CompanyJobEducations,
    CompanyJobSkills,
    SecurityLogin,
    SecurityLoginsLogs,
    SecurityLoginsRoles,
    SecurityRole,
    SystemCountryCode,
    SystemLanguageCode,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::ApplicantProfile => "ApplicantProfile",
            Relation::ApplicantProfiles => "ApplicantProfiles",
            Relation::ApplicantEducations => "ApplicantEducations",
            Relation::ApplicantJobApplications => "ApplicantJobApplications",
            Relation::ApplicantResumes => "ApplicantResumes",
            Relation::ApplicantSkills => "ApplicantSkills",
            Relation::ApplicantWorkHistories => "ApplicantWorkHistories",
            Relation::CompanyProfile => "CompanyProfile",
            Relation::CompanyDescriptions => "CompanyDescriptions",
            Relation::CompanyLocations => "CompanyLocations",
            Relation::CompanyJob => "CompanyJob",
            Relation::CompanyJobs => "CompanyJobs",
            Relation::CompanyJobDescriptions => "CompanyJobDescriptions",
            Relation::CompanyJobEducations => "CompanyJobEducations",
            Relation::CompanyJobSkills => "CompanyJobSkills",
            Relation::SecurityLogin => "SecurityLogin",
            Relation::SecurityLoginsLogs => "SecurityLoginsLogs",
            Relation::SecurityLoginsRoles => "SecurityLoginsRoles",
            Relation::SecurityRole => "SecurityRole",
            Relation::SystemCountryCode => "SystemCountryCode",
            Relation::SystemLanguageCode => "SystemLanguageCode",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Time Stamp
// =============================================================================

/// Opaque row-version token assigned by the store on every write.
///
/// Carried for display only. Nothing compares it before an update, so two
/// concurrent updates of the same row overwrite each other (last write wins).
///
/// Serialized for the UI as a lowercase hex string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct TimeStamp(Vec<u8>);

impl TimeStamp {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        TimeStamp(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex rendering, two characters per byte.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parses the hex rendering produced by [`TimeStamp::to_hex`].
    pub fn from_hex(text: &str) -> Option<Self> {
        hex::decode(text).ok().map(TimeStamp)
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for TimeStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TimeStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        TimeStamp::from_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time stamp: {text}")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
