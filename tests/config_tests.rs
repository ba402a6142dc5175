use academy_billing::config::{Config, ConfigError, ConfigManager};
use academy_billing::FuturePolicy;
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.date_format.is_empty());
    assert_eq!(cfg.future_registration, FuturePolicy::Reject);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert!(!manager.config_path().exists());
    assert_eq!(manager.load().expect("load config"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.set("date_format", "%d/%m/%Y").expect("set date format");
    cfg.set("future_registration", "allow").expect("set policy");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.date_format, "%d/%m/%Y");
    assert_eq!(loaded.future_registration, FuturePolicy::Allow);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = Config::default();
    let err = cfg
        .set("future_registration", "sometimes")
        .expect_err("should reject");
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "future_registration"));
}
