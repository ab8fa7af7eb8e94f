mod common;

use careercloud_core::{
    ApplicantEducation, CompanyProfile, DataRepository, LogicError, SystemCountryCode,
};
use careercloud_db::{Backend, DbError};
use chrono::{Duration, Utc};
use uuid::Uuid;

#[tokio::test]
async fn test_rejected_batch_never_reaches_the_store() {
    for backend in [Backend::Statement, Backend::Session] {
        let (_dir, db) = common::open(backend).await;
        let profile = common::profile(&db, None).await;
        let logic = db.logic::<ApplicantEducation>();

        let mut good = ApplicantEducation::new(Uuid::new_v4(), profile.id);
        good.major = Some("Computer Science".to_string());
        let mut bad = ApplicantEducation::new(Uuid::new_v4(), profile.id);
        bad.major = Some("AI".to_string());
        bad.start_date = Some(Utc::now() + Duration::days(1));

        let err = logic.add(&[good, bad]).await.unwrap_err();
        assert_eq!(err.validation().unwrap().codes(), vec![107, 108]);
        assert!(logic.get_all().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_store_errors_pass_through() {
    let (_dir, db) = common::open(Backend::Session).await;
    let logic = db.logic::<ApplicantEducation>();

    let mut orphan = ApplicantEducation::new(Uuid::new_v4(), Uuid::new_v4());
    orphan.major = Some("Mathematics".to_string());

    let err = logic.add(&[orphan]).await.unwrap_err();
    assert!(matches!(
        err,
        LogicError::Store(DbError::ForeignKeyViolation { .. })
    ));
}

#[tokio::test]
async fn test_company_profile_rules_guard_writes() {
    let (_dir, db) = common::open(Backend::Session).await;
    let logic = db.logic::<CompanyProfile>();

    let mut company = CompanyProfile::new(Uuid::new_v4(), Utc::now());
    company.company_website = Some("https://acme.org".to_string());
    company.contact_phone = Some("416-555-1234".to_string());
    let err = logic.add(&[company.clone()]).await.unwrap_err();
    assert_eq!(err.validation().unwrap().codes(), vec![600]);

    company.company_website = Some("https://acme.ca".to_string());
    logic.add(&[company.clone()]).await.unwrap();

    let stored = logic.get(company.id).await.unwrap().unwrap();
    assert_eq!(stored.company_website.as_deref(), Some("https://acme.ca"));
}

#[tokio::test]
async fn test_lookup_removal_is_verified() {
    let (_dir, db) = common::open(Backend::Session).await;
    common::country(&db, "CA", "Canada").await;
    let logic = db.logic::<SystemCountryCode>();

    let err = logic
        .remove(&[SystemCountryCode::new("CA", "")])
        .await
        .unwrap_err();
    assert_eq!(err.validation().unwrap().codes(), vec![901]);
    assert!(logic.get("CA").await.unwrap().is_some());

    logic.remove(&[SystemCountryCode::new("CA", "Canada")]).await.unwrap();
    assert!(logic.get("CA").await.unwrap().is_none());
}

#[tokio::test]
async fn test_reads_go_through_the_configured_backend() {
    let (_dir, db) = common::open(Backend::Statement).await;
    common::country(&db, "CA", "Canada").await;
    let logic = db.logic::<SystemCountryCode>();

    assert_eq!(logic.get("CA").await.unwrap().unwrap().name, "Canada");
    let err = logic
        .get_filtered(&careercloud_core::Filter::All)
        .await
        .unwrap_err();
    assert!(err.store().unwrap().is_capability_gap());
    assert!(logic.repository().get_all(&[]).await.unwrap().len() == 1);
}
