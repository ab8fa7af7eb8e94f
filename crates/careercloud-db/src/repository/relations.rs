//! # Eager Loading
//!
//! Fills navigation fields for the relations a caller names in `include`.
//! Each relation costs one extra query, whatever the number of rows:
//!
//! ```text
//! rows (N educations) ──collect distinct "applicant"──► [k1, k2, ...]
//!                                                        │
//!     SELECT ... FROM applicant_profiles WHERE id IN (?, ?, ...)
//!                                                        │
//! rows[i].applicant_profile = by_key[rows[i].applicant] ◄┘
//! ```
//!
//! Parent relations follow a foreign key on the loaded row; child relations
//! select every child whose foreign key points at one of the loaded keys.
//! Only one level is loaded: a loaded parent's own navigation fields stay
//! empty.

use async_trait::async_trait;
use careercloud_core::types::*;
use careercloud_core::{Entity, Relation, Value};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};

use super::{fetch_all, Record};
use crate::error::{DbError, DbResult};
use crate::sql;

/// Entity whose navigation fields can be populated from the store.
#[async_trait]
pub trait Navigate: Record {
    /// Loads `relation` for every row in `rows`.
    ///
    /// Fails with `UnknownRelation` when the entity does not declare it.
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()>;
}

/// Keys bound per `IN (...)` query. SQLite builds before 3.32 cap a
/// statement at 999 variables.
const MAX_IN_KEYS: usize = 500;

/// Every `R` whose `column` holds one of `keys`, one query per chunk.
async fn fetch_in<R: Record>(
    pool: &SqlitePool,
    column: &'static str,
    keys: Vec<Value>,
    chunk_size: usize,
) -> DbResult<Vec<R>> {
    let mut found = Vec::with_capacity(keys.len());
    for chunk in keys.chunks(chunk_size.max(1)) {
        let statement = sql::select_in::<R>(column, chunk.to_vec())?;
        let rows: Vec<R> = fetch_all(pool, &statement).await?;
        found.extend(rows);
    }
    Ok(found)
}

fn column_value<E: Entity>(row: &E, column: &str) -> Value {
    row.column_values()
        .into_iter()
        .find(|(name, _)| *name == column)
        .map(|(_, value)| value)
        .unwrap_or(Value::Null)
}

fn distinct(keys: impl Iterator<Item = Value>) -> Vec<Value> {
    let mut seen = HashSet::new();
    keys.filter(|key| !key.is_null() && seen.insert(key.clone()))
        .collect()
}

/// Attaches the parent `P` referenced by `fk_column` on each child row.
async fn load_parents<C, P>(
    pool: &SqlitePool,
    rows: &mut [C],
    fk_column: &'static str,
    attach: fn(&mut C, Option<P>),
) -> DbResult<()>
where
    C: Entity,
    P: Record,
{
    let keys = distinct(rows.iter().map(|row| column_value(row, fk_column)));
    if keys.is_empty() {
        return Ok(());
    }

    let parents: Vec<P> = fetch_in(pool, P::KEY_COLUMN, keys, MAX_IN_KEYS).await?;
    let by_key: HashMap<Value, P> = parents.into_iter().map(|p| (p.key(), p)).collect();

    for row in rows.iter_mut() {
        let parent = by_key.get(&column_value(row, fk_column)).cloned();
        attach(row, parent);
    }
    Ok(())
}

/// Attaches every child `C` whose `fk_column` holds a parent row's key.
async fn load_children<P, C>(
    pool: &SqlitePool,
    rows: &mut [P],
    fk_column: &'static str,
    attach: fn(&mut P, Vec<C>),
) -> DbResult<()>
where
    P: Entity,
    C: Record,
{
    let keys = distinct(rows.iter().map(|row| row.key()));
    if keys.is_empty() {
        return Ok(());
    }

    let children: Vec<C> = fetch_in(pool, fk_column, keys, MAX_IN_KEYS).await?;

    let mut grouped: HashMap<Value, Vec<C>> = HashMap::new();
    for child in children {
        grouped
            .entry(column_value(&child, fk_column))
            .or_default()
            .push(child);
    }

    for row in rows.iter_mut() {
        let children = grouped.remove(&row.key()).unwrap_or_default();
        attach(row, children);
    }
    Ok(())
}

fn undeclared<E: Entity>(relation: Relation) -> DbResult<()> {
    Err(DbError::unknown_relation(E::NAME, relation))
}

// =============================================================================
// Applicants
// =============================================================================

#[async_trait]
impl Navigate for ApplicantProfile {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::SecurityLogin => {
                load_parents(pool, rows, "login", |row: &mut Self, p: Option<SecurityLogin>| {
                    row.security_login = p.map(Box::new)
                })
                .await
            }
            Relation::SystemCountryCode => {
                load_parents(pool, rows, "country", |row: &mut Self, p: Option<SystemCountryCode>| {
                    row.system_country_code = p.map(Box::new)
                })
                .await
            }
            Relation::ApplicantEducations => {
                load_children(pool, rows, "applicant", |row: &mut Self, c: Vec<ApplicantEducation>| {
                    row.applicant_educations = Some(c)
                })
                .await
            }
            Relation::ApplicantJobApplications => {
                load_children(
                    pool,
                    rows,
                    "applicant",
                    |row: &mut Self, c: Vec<ApplicantJobApplication>| {
                        row.applicant_job_applications = Some(c)
                    },
                )
                .await
            }
            Relation::ApplicantResumes => {
                load_children(pool, rows, "applicant", |row: &mut Self, c: Vec<ApplicantResume>| {
                    row.applicant_resumes = Some(c)
                })
                .await
            }
            Relation::ApplicantSkills => {
                load_children(pool, rows, "applicant", |row: &mut Self, c: Vec<ApplicantSkill>| {
                    row.applicant_skills = Some(c)
                })
                .await
            }
            Relation::ApplicantWorkHistories => {
                load_children(pool, rows, "applicant", |row: &mut Self, c: Vec<ApplicantWorkHistory>| {
                    row.applicant_work_histories = Some(c)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for ApplicantEducation {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfile => {
                load_parents(pool, rows, "applicant", |row: &mut Self, p: Option<ApplicantProfile>| {
                    row.applicant_profile = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for ApplicantJobApplication {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfile => {
                load_parents(pool, rows, "applicant", |row: &mut Self, p: Option<ApplicantProfile>| {
                    row.applicant_profile = p.map(Box::new)
                })
                .await
            }
            Relation::CompanyJob => {
                load_parents(pool, rows, "job", |row: &mut Self, p: Option<CompanyJob>| {
                    row.company_job = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for ApplicantResume {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfile => {
                load_parents(pool, rows, "applicant", |row: &mut Self, p: Option<ApplicantProfile>| {
                    row.applicant_profile = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for ApplicantSkill {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfile => {
                load_parents(pool, rows, "applicant", |row: &mut Self, p: Option<ApplicantProfile>| {
                    row.applicant_profile = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for ApplicantWorkHistory {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfile => {
                load_parents(pool, rows, "applicant", |row: &mut Self, p: Option<ApplicantProfile>| {
                    row.applicant_profile = p.map(Box::new)
                })
                .await
            }
            Relation::SystemCountryCode => {
                load_parents(
                    pool,
                    rows,
                    "country_code",
                    |row: &mut Self, p: Option<SystemCountryCode>| {
                        row.system_country_code = p.map(Box::new)
                    },
                )
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

// =============================================================================
// Companies
// =============================================================================

#[async_trait]
impl Navigate for CompanyProfile {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyJobs => {
                load_children(pool, rows, "company", |row: &mut Self, c: Vec<CompanyJob>| {
                    row.company_jobs = Some(c)
                })
                .await
            }
            Relation::CompanyDescriptions => {
                load_children(pool, rows, "company", |row: &mut Self, c: Vec<CompanyDescription>| {
                    row.company_descriptions = Some(c)
                })
                .await
            }
            Relation::CompanyLocations => {
                load_children(pool, rows, "company", |row: &mut Self, c: Vec<CompanyLocation>| {
                    row.company_locations = Some(c)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for CompanyDescription {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyProfile => {
                load_parents(pool, rows, "company", |row: &mut Self, p: Option<CompanyProfile>| {
                    row.company_profile = p.map(Box::new)
                })
                .await
            }
            Relation::SystemLanguageCode => {
                load_parents(
                    pool,
                    rows,
                    "language_id",
                    |row: &mut Self, p: Option<SystemLanguageCode>| {
                        row.system_language_code = p.map(Box::new)
                    },
                )
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for CompanyLocation {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyProfile => {
                load_parents(pool, rows, "company", |row: &mut Self, p: Option<CompanyProfile>| {
                    row.company_profile = p.map(Box::new)
                })
                .await
            }
            Relation::SystemCountryCode => {
                load_parents(
                    pool,
                    rows,
                    "country_code",
                    |row: &mut Self, p: Option<SystemCountryCode>| {
                        row.system_country_code = p.map(Box::new)
                    },
                )
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for CompanyJob {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyProfile => {
                load_parents(pool, rows, "company", |row: &mut Self, p: Option<CompanyProfile>| {
                    row.company_profile = p.map(Box::new)
                })
                .await
            }
            Relation::CompanyJobEducations => {
                load_children(pool, rows, "job", |row: &mut Self, c: Vec<CompanyJobEducation>| {
                    row.company_job_educations = Some(c)
                })
                .await
            }
            Relation::CompanyJobDescriptions => {
                load_children(pool, rows, "job", |row: &mut Self, c: Vec<CompanyJobDescription>| {
                    row.company_job_descriptions = Some(c)
                })
                .await
            }
            Relation::ApplicantJobApplications => {
                load_children(pool, rows, "job", |row: &mut Self, c: Vec<ApplicantJobApplication>| {
                    row.applicant_job_applications = Some(c)
                })
                .await
            }
            Relation::CompanyJobSkills => {
                load_children(pool, rows, "job", |row: &mut Self, c: Vec<CompanyJobSkill>| {
                    row.company_job_skills = Some(c)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for CompanyJobDescription {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyJob => {
                load_parents(pool, rows, "job", |row: &mut Self, p: Option<CompanyJob>| {
                    row.company_job = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for CompanyJobEducation {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyJob => {
                load_parents(pool, rows, "job", |row: &mut Self, p: Option<CompanyJob>| {
                    row.company_job = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for CompanyJobSkill {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyJob => {
                load_parents(pool, rows, "job", |row: &mut Self, p: Option<CompanyJob>| {
                    row.company_job = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

// =============================================================================
// Security
// =============================================================================

#[async_trait]
impl Navigate for SecurityLogin {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfiles => {
                load_children(pool, rows, "login", |row: &mut Self, c: Vec<ApplicantProfile>| {
                    row.applicant_profiles = Some(c)
                })
                .await
            }
            Relation::SecurityLoginsLogs => {
                load_children(pool, rows, "login", |row: &mut Self, c: Vec<SecurityLoginsLog>| {
                    row.security_logins_logs = Some(c)
                })
                .await
            }
            Relation::SecurityLoginsRoles => {
                load_children(pool, rows, "login", |row: &mut Self, c: Vec<SecurityLoginsRole>| {
                    row.security_logins_roles = Some(c)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for SecurityLoginsLog {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::SecurityLogin => {
                load_parents(pool, rows, "login", |row: &mut Self, p: Option<SecurityLogin>| {
                    row.security_login = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for SecurityRole {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::SecurityLoginsRoles => {
                load_children(pool, rows, "role", |row: &mut Self, c: Vec<SecurityLoginsRole>| {
                    row.security_logins_roles = Some(c)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for SecurityLoginsRole {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::SecurityLogin => {
                load_parents(pool, rows, "login", |row: &mut Self, p: Option<SecurityLogin>| {
                    row.security_login = p.map(Box::new)
                })
                .await
            }
            Relation::SecurityRole => {
                load_parents(pool, rows, "role", |row: &mut Self, p: Option<SecurityRole>| {
                    row.security_role = p.map(Box::new)
                })
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

// =============================================================================
// System Lookups
// =============================================================================

#[async_trait]
impl Navigate for SystemCountryCode {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::ApplicantProfiles => {
                load_children(pool, rows, "country", |row: &mut Self, c: Vec<ApplicantProfile>| {
                    row.applicant_profiles = Some(c)
                })
                .await
            }
            Relation::ApplicantWorkHistories => {
                load_children(
                    pool,
                    rows,
                    "country_code",
                    |row: &mut Self, c: Vec<ApplicantWorkHistory>| {
                        row.applicant_work_histories = Some(c)
                    },
                )
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}

#[async_trait]
impl Navigate for SystemLanguageCode {
    async fn include(pool: &SqlitePool, rows: &mut [Self], relation: Relation) -> DbResult<()> {
        match relation {
            Relation::CompanyDescriptions => {
                load_children(
                    pool,
                    rows,
                    "language_id",
                    |row: &mut Self, c: Vec<CompanyDescription>| {
                        row.company_descriptions = Some(c)
                    },
                )
                .await
            }
            other => undeclared::<Self>(other),
        }
    }
}
