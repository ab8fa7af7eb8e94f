use careercloud_db::config::CONNECTION_ENV;
use careercloud_db::{Backend, ConfigError, Database, DbConfig, Settings};
use std::fs;

// One test: it mutates the process environment.
#[tokio::test]
async fn test_settings_file_and_environment_override() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Settings::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io { .. }));

    let path = dir.path().join("appsettings.json");
    let file_db = dir.path().join("from-file.db");
    fs::write(
        &path,
        format!(
            r#"{{"ConnectionStrings":{{"DataConnection":"sqlite://{}"}},"Backend":"statement"}}"#,
            file_db.display()
        ),
    )
    .unwrap();

    std::env::remove_var(CONNECTION_ENV);
    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.backend, Backend::Statement);

    let config = DbConfig::from_settings(&settings);
    assert_eq!(config.database_path, file_db);
    let db = Database::new(config).await.unwrap();
    assert!(db.health_check().await);
    assert_eq!(db.backend(), Backend::Statement);
    db.close().await;
    assert!(file_db.exists());

    let env_db = dir.path().join("from-env.db");
    std::env::set_var(CONNECTION_ENV, format!("Data Source={}", env_db.display()));
    let settings = Settings::load(&path).unwrap();
    std::env::remove_var(CONNECTION_ENV);
    assert_eq!(DbConfig::from_settings(&settings).database_path, env_db);

    fs::write(&path, r#"{"ConnectionStrings":{"DataConnection":""}}"#).unwrap();
    assert!(matches!(
        Settings::load(&path),
        Err(ConfigError::MissingRequired(_))
    ));
}
