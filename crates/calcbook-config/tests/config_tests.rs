use calcbook_config::{Config, ConfigError, ConfigManager, StoreBackend};
use std::fs;
use tempfile::tempdir;

#[test]
fn default_config_uses_json_store_and_info_logging() {
    let cfg = Config::default();

    assert_eq!(cfg.store, StoreBackend::Json);
    assert_eq!(cfg.log_filter, "calcbook=info");
    assert!(cfg.ui_color_enabled);
    assert!(cfg.credentials.is_empty());
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load config"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set("store", "memory").expect("set store");
    cfg.set("display_precision", "2").expect("set precision");
    cfg.grant("alice-token", 1, Some("alice"));

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(manager.config_path().starts_with(dir.path()));
}

#[test]
fn partial_config_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), r#"{ "plain_output": true }"#).expect("write config");

    let loaded = manager.load().expect("load config");
    assert!(loaded.plain_output);
    assert_eq!(loaded.store, StoreBackend::Json);
    assert_eq!(loaded.log_filter, "calcbook=info");
}

#[test]
fn set_rejects_unknown_keys_and_bad_values() {
    let mut cfg = Config::default();

    assert!(matches!(
        cfg.set("theme", "dark"),
        Err(ConfigError::UnknownKey(key)) if key == "theme"
    ));
    assert!(matches!(
        cfg.set("store", "postgres"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("plain_output", "maybe"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("display_precision", "40"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert_eq!(cfg, Config::default());
}

#[test]
fn grants_are_replaced_per_token_and_revocable() {
    let mut cfg = Config::default();
    cfg.grant("shared", 1, None);
    cfg.grant("shared", 2, Some("second"));

    assert_eq!(cfg.credentials.len(), 1);
    assert_eq!(cfg.credentials[0].owner_id, 2);
    assert!(cfg.revoke("shared"));
    assert!(!cfg.revoke("shared"));
    assert_eq!(cfg.revoked, vec!["shared".to_string()]);
    assert!(!cfg.revoke("never-granted"));
    assert_eq!(cfg.revoked.len(), 1);
}

#[test]
fn revoked_tokens_persist_until_granted_again() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.grant("alpha", 1, None);
    cfg.revoke("alpha");
    manager.save(&cfg).expect("save config");

    let mut loaded = manager.load().expect("load config");
    assert_eq!(loaded.revoked, vec!["alpha".to_string()]);

    loaded.grant("alpha", 2, None);
    assert!(loaded.revoked.is_empty());
    assert_eq!(loaded.credentials[0].owner_id, 2);
}

#[test]
fn data_root_defaults_under_home() {
    let mut cfg = Config::default();
    let home = std::path::Path::new("/srv/calcbook");
    assert_eq!(cfg.resolve_data_root(home), home.join("data"));

    cfg.set("data_root", "/var/lib/calc").expect("set data_root");
    assert_eq!(
        cfg.resolve_data_root(home),
        std::path::PathBuf::from("/var/lib/calc")
    );
    cfg.set("data_root", "default").expect("reset data_root");
    assert_eq!(cfg.data_root, None);
}
