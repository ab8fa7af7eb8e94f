//! # Seed Data Generator
//!
//! Populates a CareerCloud database with lookup rows and a small, valid
//! sample graph for development. Every write goes through `Logic`, so the
//! sample data passes the same rules as real input.
//!
//! ## Usage
//! ```bash
//! # Use ./appsettings.json
//! cargo run -p careercloud-db --bin seed
//!
//! # Explicit settings file and applicant count
//! cargo run -p careercloud-db --bin seed -- --config ./conf/appsettings.json --applicants 50
//!
//! # Ignore settings, write straight to a file
//! cargo run -p careercloud-db --bin seed -- --db ./data/careercloud.db
//! ```
//!
//! `RUST_LOG=careercloud_db=debug` shows every batch.
//!
//! ## Generated Data
//! - Country and language lookups
//! - Roles: Administrator, Applicant, Employer
//! - One company per name in `COMPANIES`, each with a description,
//!   a location and two open jobs
//! - N applicants, each with a login, profile, education, skill, work
//!   history, resume and one application

use chrono::{Datelike, Duration, Utc};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use careercloud_core::*;
use careercloud_db::{Database, DbConfig, Settings};

const COUNTRIES: &[(&str, &str)] = &[
    ("CA", "Canada"),
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("IN", "India"),
    ("DE", "Germany"),
];

const LANGUAGES: &[(&str, &str, &str)] = &[
    ("EN", "English", "English"),
    ("FR", "French", "Français"),
    ("DE", "German", "Deutsch"),
];

const ROLES: &[&str] = &["Administrator", "Applicant", "Employer"];

/// (name, website, city, province)
const COMPANIES: &[(&str, &str, &str, &str)] = &[
    ("Northwind Traders", "https://northwind.ca", "Toronto", "ON"),
    ("Contoso Systems", "https://contoso.com", "Vancouver", "BC"),
    ("Fabrikam Logistics", "https://fabrikam.biz", "Montreal", "QC"),
];

const MAJORS: &[&str] = &["Computer Science", "Accounting", "Mechanical Engineering", "Marketing"];
const SKILLS: &[&str] = &["Rust", "SQL", "Project Management", "Welding", "Copywriting"];
const LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];
const JOB_TITLES: &[&str] = &["Software Developer", "Data Analyst", "Site Supervisor"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = String::from("appsettings.json");
    let mut db_path: Option<String> = None;
    let mut applicants: usize = 20;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--applicants" | "-n" => {
                if i + 1 < args.len() {
                    applicants = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CareerCloud Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>     Settings file (default: appsettings.json)");
                println!("  -d, --db <PATH>         Database file, bypasses the settings file");
                println!("  -n, --applicants <N>    Applicants to generate (default: 20)");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_settings(&Settings::load(&config_path)?),
    };
    let db = Database::new(config).await?;

    let existing = db.logic::<SystemCountryCode>().get_all().await?;
    if !existing.is_empty() {
        warn!(
            countries = existing.len(),
            "Database already seeded; delete the file to regenerate"
        );
        return Ok(());
    }

    let start = std::time::Instant::now();

    seed_lookups(&db).await?;
    let roles = seed_roles(&db).await?;
    let jobs = seed_companies(&db).await?;
    seed_applicants(&db, applicants, &roles, &jobs).await?;

    info!(
        applicants,
        companies = COMPANIES.len(),
        elapsed = ?start.elapsed(),
        "Seed complete"
    );
    Ok(())
}

async fn seed_lookups(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let countries: Vec<SystemCountryCode> = COUNTRIES
        .iter()
        .map(|(code, name)| SystemCountryCode::new(*code, *name))
        .collect();
    db.logic::<SystemCountryCode>().add(&countries).await?;

    let languages: Vec<SystemLanguageCode> = LANGUAGES
        .iter()
        .map(|(id, name, native)| SystemLanguageCode::new(*id, *name, *native))
        .collect();
    db.logic::<SystemLanguageCode>().add(&languages).await?;

    info!(countries = countries.len(), languages = languages.len(), "Lookups seeded");
    Ok(())
}

async fn seed_roles(db: &Database) -> Result<Vec<SecurityRole>, Box<dyn std::error::Error>> {
    let roles: Vec<SecurityRole> = ROLES
        .iter()
        .map(|role| SecurityRole::new(Uuid::new_v4(), *role))
        .collect();
    db.logic::<SecurityRole>().add(&roles).await?;
    Ok(roles)
}

async fn seed_companies(db: &Database) -> Result<Vec<CompanyJob>, Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut profiles = Vec::new();
    let mut descriptions = Vec::new();
    let mut locations = Vec::new();
    let mut jobs = Vec::new();
    let mut job_descriptions = Vec::new();
    let mut job_skills = Vec::new();
    let mut job_educations = Vec::new();

    for (idx, (name, website, city, province)) in COMPANIES.iter().enumerate() {
        let mut profile = CompanyProfile::new(Uuid::new_v4(), now - Duration::days(365));
        profile.company_website = Some(website.to_string());
        profile.contact_phone = Some(format!("416-555-{:04}", 1000 + idx));
        profile.contact_name = Some("Hiring Desk".to_string());

        let mut description = CompanyDescription::new(Uuid::new_v4(), profile.id, "EN");
        description.company_name = Some(name.to_string());
        description.company_description = Some(format!("{name} is hiring across Canada."));

        let mut location = CompanyLocation::new(Uuid::new_v4(), profile.id);
        location.country_code = Some("CA".to_string());
        location.province = Some(province.to_string());
        location.street = Some(format!("{} King Street", 100 + idx));
        location.city = Some(city.to_string());
        location.postal_code = Some("M5H 1A1".to_string());

        for (j, title) in JOB_TITLES.iter().enumerate().take(2) {
            let job = CompanyJob::new(Uuid::new_v4(), profile.id, now - Duration::days(30));

            let mut job_description = CompanyJobDescription::new(Uuid::new_v4(), job.id);
            job_description.job_name = Some(title.to_string());
            job_description.job_descriptions = Some(format!("{title} at {name}."));

            let mut skill = CompanyJobSkill::new(
                Uuid::new_v4(),
                job.id,
                SKILLS[(idx + j) % SKILLS.len()],
                LEVELS[j % LEVELS.len()],
            );
            skill.importance = 3;

            let mut education = CompanyJobEducation::new(Uuid::new_v4(), job.id);
            education.major = Some(MAJORS[(idx + j) % MAJORS.len()].to_string());
            education.importance = 2;

            job_descriptions.push(job_description);
            job_skills.push(skill);
            job_educations.push(education);
            jobs.push(job);
        }

        profiles.push(profile);
        descriptions.push(description);
        locations.push(location);
    }

    // Parents first: the store enforces foreign keys
    db.logic::<CompanyProfile>().add(&profiles).await?;
    db.logic::<CompanyDescription>().add(&descriptions).await?;
    db.logic::<CompanyLocation>().add(&locations).await?;
    db.logic::<CompanyJob>().add(&jobs).await?;
    db.logic::<CompanyJobDescription>().add(&job_descriptions).await?;
    db.logic::<CompanyJobSkill>().add(&job_skills).await?;
    db.logic::<CompanyJobEducation>().add(&job_educations).await?;

    info!(companies = profiles.len(), jobs = jobs.len(), "Companies seeded");
    Ok(jobs)
}

async fn seed_applicants(
    db: &Database,
    count: usize,
    roles: &[SecurityRole],
    jobs: &[CompanyJob],
) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let applicant_role = roles.iter().find(|r| r.role == "Applicant").map(|r| r.id);

    for n in 0..count {
        let mut login = SecurityLogin::new(
            Uuid::new_v4(),
            format!("applicant{n:03}"),
            "changeme",
            format!("applicant{n:03}@example.com"),
            now - Duration::days(90),
        );
        login.full_name = Some(format!("Applicant {n}"));
        login.preferred_language = Some("EN".to_string());
        db.logic::<SecurityLogin>().add(&[login.clone()]).await?;

        if let Some(role) = applicant_role {
            let grant = SecurityLoginsRole::new(Uuid::new_v4(), login.id, role);
            db.logic::<SecurityLoginsRole>().add(&[grant]).await?;
        }

        let mut profile = ApplicantProfile::new(Uuid::new_v4(), login.id);
        profile.current_salary = Some(Money::from_minor(5_500_000 + (n as i64) * 10_000));
        profile.currency = Some("CAD".to_string());
        profile.country = Some(COUNTRIES[n % COUNTRIES.len()].0.to_string());
        profile.city = Some("Toronto".to_string());
        db.logic::<ApplicantProfile>().add(&[profile.clone()]).await?;

        let mut education = ApplicantEducation::new(Uuid::new_v4(), profile.id);
        education.major = Some(MAJORS[n % MAJORS.len()].to_string());
        education.certificate_diploma = Some("Bachelor".to_string());
        education.start_date = Some(now - Duration::days(4 * 365));
        education.completion_date = Some(now - Duration::days(365));
        education.completion_percent = Some(100);
        db.logic::<ApplicantEducation>().add(&[education]).await?;

        let year = now.year();
        let skill = ApplicantSkill::new(
            Uuid::new_v4(),
            profile.id,
            SKILLS[n % SKILLS.len()],
            LEVELS[n % LEVELS.len()],
        )
        .with_period((1, year - 3), (12, year - 1));
        db.logic::<ApplicantSkill>().add(&[skill]).await?;

        let mut history = ApplicantWorkHistory::new(
            Uuid::new_v4(),
            profile.id,
            COMPANIES[n % COMPANIES.len()].0,
            "CA",
        );
        history.location = "Toronto".to_string();
        history.job_title = JOB_TITLES[n % JOB_TITLES.len()].to_string();
        history.job_description = "Full-time position".to_string();
        history.start_month = 3;
        history.start_year = year - 2;
        history.end_month = 6;
        history.end_year = year - 1;
        db.logic::<ApplicantWorkHistory>().add(&[history]).await?;

        let mut resume = ApplicantResume::new(
            Uuid::new_v4(),
            profile.id,
            format!("Applicant {n}: experienced and available."),
        );
        resume.last_updated = Some(now);
        db.logic::<ApplicantResume>().add(&[resume]).await?;

        if let Some(job) = jobs.get(n % jobs.len().max(1)) {
            let application = ApplicantJobApplication::new(
                Uuid::new_v4(),
                profile.id,
                job.id,
                now - Duration::days(1),
            );
            db.logic::<ApplicantJobApplication>().add(&[application]).await?;
        }

        let log = SecurityLoginsLog::new(Uuid::new_v4(), login.id, "127.0.0.1", now, true);
        db.logic::<SecurityLoginsLog>().add(&[log]).await?;
    }

    info!(applicants = count, "Applicants seeded");
    Ok(())
}
