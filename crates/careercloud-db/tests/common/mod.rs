//! Shared fixtures for the database integration tests.

#![allow(dead_code)]

use careercloud_core::{ApplicantProfile, DataRepository, SecurityLogin, SystemCountryCode};
use careercloud_db::{Backend, Database, DbConfig};
use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

/// Fresh migrated database in a temp directory. Keep the `TempDir` alive
/// for as long as the database is used.
pub async fn open(backend: Backend) -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("careercloud.db")).backend(backend);
    let db = Database::new(config).await.unwrap();
    (dir, db)
}

pub async fn login(db: &Database, name: &str) -> SecurityLogin {
    let login = SecurityLogin::new(
        Uuid::new_v4(),
        name,
        "secret",
        format!("{name}@example.com"),
        Utc::now(),
    );
    db.session_repository::<SecurityLogin>()
        .add(&[login.clone()])
        .await
        .unwrap();
    login
}

pub async fn country(db: &Database, code: &str, name: &str) -> SystemCountryCode {
    let country = SystemCountryCode::new(code, name);
    db.session_repository::<SystemCountryCode>()
        .add(&[country.clone()])
        .await
        .unwrap();
    country
}

/// Profile owned by a new login.
pub async fn profile(db: &Database, country: Option<&str>) -> ApplicantProfile {
    let owner = login(db, &format!("user-{}", Uuid::new_v4().simple())).await;
    let mut profile = ApplicantProfile::new(Uuid::new_v4(), owner.id);
    profile.country = country.map(str::to_string);
    db.session_repository::<ApplicantProfile>()
        .add(&[profile.clone()])
        .await
        .unwrap();
    profile
}
