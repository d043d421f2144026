use fleur_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_targets_philippine_peso() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "PHP");
    assert_eq!(cfg.currency_symbol, "₱");
    assert!(cfg.notify_on_status_change);
    assert!(!cfg.locale.is_empty());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.last_signed_in_user = Some("maria@example.com".to_string());
    cfg.notify_on_status_change = false;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(
        loaded.last_signed_in_user.as_deref(),
        Some("maria@example.com")
    );
    assert!(!loaded.notify_on_status_change);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("base dir");

    let loaded = manager.load().expect("load defaults");
    assert_eq!(loaded.currency, "PHP");
}

#[test]
fn older_config_files_fill_in_new_fields() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));
    std::fs::write(
        manager.config_path(),
        r#"{ "locale": "fil-PH", "currency": "PHP" }"#,
    )
    .expect("write legacy file");

    let loaded = manager.load().expect("load legacy");
    assert_eq!(loaded.locale, "fil-PH");
    assert_eq!(loaded.currency_symbol, "₱");
    assert!(loaded.notify_on_status_change);
}

#[test]
fn receipts_root_prefers_the_configured_directory() {
    let mut cfg = Config::default();
    cfg.receipts_root = Some(std::path::PathBuf::from("/tmp/fleur-receipts"));
    assert_eq!(
        cfg.resolve_receipts_root(),
        std::path::PathBuf::from("/tmp/fleur-receipts")
    );
}
