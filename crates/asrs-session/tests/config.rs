use std::path::PathBuf;

use asrs_session::config::{load_config_from, save_config_to, SessionConfig};
use asrs_session::logging;

#[test]
fn missing_config_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.log_filter, "info");
}

#[test]
fn saved_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = SessionConfig {
        config_version: 0,
        data_dir: Some(PathBuf::from("/var/lib/asrs")),
        log_filter: "asrs_session=debug".to_string(),
        json_logs: true,
    };

    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.data_dir, config.data_dir);
    assert_eq!(loaded.log_filter, config.log_filter);
    assert!(loaded.json_logs);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "storage_dir": "/tmp/asrs" }"#).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.data_dir, Some(PathBuf::from("/tmp/asrs")));
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 99 }"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build"));
}

#[test]
fn explicit_data_dir_wins() {
    let config = SessionConfig {
        data_dir: Some(PathBuf::from("/srv/asrs")),
        ..SessionConfig::default()
    };
    assert_eq!(config.resolved_data_dir().unwrap(), PathBuf::from("/srv/asrs"));
}

#[test]
fn logging_init_tolerates_repeat_calls() {
    let config = SessionConfig::default();
    logging::init(&config).unwrap();
    logging::init(&config).unwrap();
}

#[test]
fn config_version_beyond_u32_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 4294967296 }"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("unsupported config_version"));
}
