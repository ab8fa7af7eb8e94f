//! # Domain Types
//!
//! The nineteen CareerCloud records, one per table.
//!
//! ## Relationship Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SecurityLogin ──┬──► SecurityLoginsLog (N)                             │
//! │                  ├──► SecurityLoginsRole (N) ◄── SecurityRole           │
//! │                  └──► ApplicantProfile (N)                              │
//! │                         ├──► ApplicantEducation (N)                     │
//! │                         ├──► ApplicantSkill (N)                         │
//! │                         ├──► ApplicantWorkHistory (N)                   │
//! │                         ├──► ApplicantResume (N)                        │
//! │                         └──► ApplicantJobApplication (N)                │
//! │                                        ▲                                │
//! │  CompanyProfile ──┬──► CompanyJob (N) ─┴─┬──► CompanyJobDescription (N) │
//! │                   ├──► CompanyDescription├──► CompanyJobEducation (N)   │
//! │                   └──► CompanyLocation   └──► CompanyJobSkill (N)       │
//! │                                                                         │
//! │  SystemCountryCode / SystemLanguageCode: lookups keyed by natural code  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Conventions
//! - `id`: UUID v4 surface identifier (lookups use their code instead)
//! - Foreign keys are plain ids; the store enforces them, not this crate
//! - `time_stamp`: store-assigned row version, display only
//! - Navigation fields (`applicant_profile`, `company_jobs`, ...) are never
//!   persisted. Only the session backend populates them, and only when
//!   asked to eager-load that relation.

mod applicant;
mod company;
mod security;
mod system;

pub use applicant::{
    ApplicantEducation, ApplicantJobApplication, ApplicantProfile, ApplicantResume,
    ApplicantSkill, ApplicantWorkHistory,
};
pub use company::{
    CompanyDescription, CompanyJob, CompanyJobDescription, CompanyJobEducation, CompanyJobSkill,
    CompanyLocation, CompanyProfile,
};
pub use security::{SecurityLogin, SecurityLoginsLog, SecurityLoginsRole, SecurityRole};
pub use system::{SystemCountryCode, SystemLanguageCode};

#[cfg(test)]
pub(crate) mod drift {
    //! Shared check that an entity's write mapping matches its column list.

    use crate::entity::Entity;

    pub fn assert_columns_match<E: Entity>(sample: &E) {
        let names: Vec<&str> = sample.column_values().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, E::COLUMNS, "column drift in {}", E::NAME);
        assert_eq!(names[0], E::KEY_COLUMN, "{} key column must come first", E::NAME);
        assert_eq!(sample.column_values()[0].1, sample.key());
    }
}
