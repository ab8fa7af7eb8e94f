mod common;

use careercloud_core::{
    ApplicantEducation, CompanyProfile, DataRepository, Filter, Relation, SystemCountryCode,
    Value,
};
use careercloud_db::{AnyRepository, Backend, DbError};
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

#[tokio::test]
async fn test_configured_backend_is_statement() {
    let (_dir, db) = common::open(Backend::Statement).await;

    let repo = db.repository::<SystemCountryCode>();
    assert!(matches!(repo, AnyRepository::Statement(_)));
    assert_eq!(repo.backend_name(), "statement");
}

#[tokio::test]
async fn test_lookup_round_trip() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let repo = db.statement_repository::<SystemCountryCode>();

    repo.add(&[
        SystemCountryCode::new("CA", "Canada"),
        SystemCountryCode::new("US", "United States"),
    ])
    .await
    .unwrap();
    assert_eq!(repo.get_all(&[]).await.unwrap().len(), 2);

    let mut canada = repo
        .get_single(&Filter::eq("code", "CA"), &[])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(canada.name, "Canada");

    canada.name = "Kanata".to_string();
    repo.update(&[canada.clone()]).await.unwrap();
    let reread = repo
        .get_single(&Filter::eq("code", "CA"), &[])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.name, "Kanata");

    repo.remove(&[canada]).await.unwrap();
    assert!(repo
        .get_single(&Filter::eq("code", "CA"), &[])
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_added_row_reads_back_field_for_field() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let repo = db.statement_repository::<CompanyProfile>();

    let mut company = CompanyProfile::new(
        Uuid::new_v4(),
        Utc.with_ymd_and_hms(2020, 1, 15, 9, 30, 0).unwrap(),
    );
    company.company_website = Some("https://acme.biz".to_string());
    company.contact_phone = Some("905-555-0199".to_string());
    company.contact_name = None;
    company.company_logo = Some(vec![0x89, 0x50, 0x4e, 0x47]);
    repo.add(&[company.clone()]).await.unwrap();

    let mut rows = repo.get_all(&[]).await.unwrap();
    assert_eq!(rows.len(), 1);
    let stored = rows.remove(0);
    assert!(stored.time_stamp.is_some());
    assert_eq!(
        CompanyProfile {
            time_stamp: None,
            ..stored
        },
        company
    );
}

#[tokio::test]
async fn test_missing_key_is_a_silent_no_op() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let repo = db.statement_repository::<SystemCountryCode>();
    repo.add(&[SystemCountryCode::new("CA", "Canada")]).await.unwrap();
    let before = repo.get_all(&[]).await.unwrap();

    let ghost = SystemCountryCode::new("ZZ", "Nowhere");
    repo.update(&[ghost.clone()]).await.unwrap();
    repo.remove(&[ghost]).await.unwrap();

    assert_eq!(repo.get_all(&[]).await.unwrap(), before);
}

#[tokio::test]
async fn test_batch_is_not_atomic() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let repo = db.statement_repository::<SystemCountryCode>();

    let err = repo
        .add(&[
            SystemCountryCode::new("CA", "Canada"),
            SystemCountryCode::new("CA", "Canada again"),
        ])
        .await
        .unwrap_err();
    match err {
        DbError::UniqueViolation { field, message } => {
            assert_eq!(field, "system_country_codes.code");
            assert!(message.starts_with("UNIQUE constraint failed"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }

    // The first insert committed on its own
    let rows = repo.get_all(&[]).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Canada");
}

#[tokio::test]
async fn test_no_match_is_none() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let repo = db.statement_repository::<ApplicantEducation>();

    let found = repo
        .get_single(&Filter::eq("id", Uuid::new_v4()), &[])
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_capability_gaps() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let repo = db.statement_repository::<SystemCountryCode>();

    let err = repo.get_filtered(&Filter::All, &[]).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::NotSupported {
            operation: "get_filtered",
            backend: "statement"
        }
    ));

    let err = repo.call_procedure("usp_refresh", &[]).await.unwrap_err();
    assert!(err.is_capability_gap());
}

#[tokio::test]
async fn test_relations_are_never_loaded_and_time_stamp_is_assigned() {
    let (_dir, db) = common::open(Backend::Statement).await;
    let profile = common::profile(&db, None).await;
    let repo = db.statement_repository::<ApplicantEducation>();

    let mut education = ApplicantEducation::new(Uuid::new_v4(), profile.id);
    education.major = Some("Computer Science".to_string());
    education.start_date = Some(Utc::now() - Duration::days(400));
    education.completion_percent = Some(80);
    repo.add(&[education.clone()]).await.unwrap();

    let stored = repo
        .get_single(&Filter::eq("id", education.id), &[Relation::ApplicantProfile])
        .await
        .unwrap()
        .unwrap();
    assert!(stored.applicant_profile.is_none());
    assert_eq!(stored.major.as_deref(), Some("Computer Science"));
    assert_eq!(stored.completion_percent, Some(80));

    let first = stored.time_stamp.clone().unwrap();
    assert_eq!(first.as_bytes().len(), 8);

    repo.update(&[stored]).await.unwrap();
    let updated = repo
        .get_single(&Filter::eq("id", Value::Uuid(education.id)), &[])
        .await
        .unwrap()
        .unwrap();
    assert_ne!(updated.time_stamp, Some(first));
}
