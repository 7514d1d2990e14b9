use std::io::Write;

use todolist::config::Config;
use todolist::constants::{DEFAULT_API_URL, UNCATEGORIZED_LABEL};
use todolist::models::SortOption;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.display.uncategorized_label, UNCATEGORIZED_LABEL);
    assert_eq!(config.display.default_sort, SortOption::Creation);
    assert!(config.display.show_completion);
    assert!(config.session.path.is_none());
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Timeout out of range should fail
    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.api.timeout_secs = 301;
    assert!(config.validate().is_err());

    // Reset and test a URL without scheme
    config.api.timeout_secs = 30;
    config.api.base_url = "example.com/api".to_string();
    assert!(config.validate().is_err());

    // Reset and test a blank group label
    config.api.base_url = "http://localhost:8000/api".to_string();
    config.display.uncategorized_label = "   ".to_string();
    assert!(config.validate().is_err());

    // Reset and test an unknown logging level
    config.display.uncategorized_label = "Other".to_string();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("timeout_secs = 30"));
    assert!(toml_str.contains("default_sort = \"created\""));
    assert!(toml_str.contains(DEFAULT_API_URL));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[display]
default_sort = "alphabetical"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.display.default_sort, SortOption::Alphabetical);
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert_eq!(config.display.uncategorized_label, UNCATEGORIZED_LABEL);
    assert!(config.display.show_completion);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_override_replaces_base_url() {
    let mut config = Config::default();
    config.apply_env_overrides(Some("  http://localhost:8000/api ".to_string()));
    assert_eq!(config.api.base_url, "http://localhost:8000/api");

    // Blank values are ignored
    config.apply_env_overrides(Some("   ".to_string()));
    assert_eq!(config.api.base_url, "http://localhost:8000/api");
    config.apply_env_overrides(None);
    assert_eq!(config.api.base_url, "http://localhost:8000/api");
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[api]\ntimeout_secs = 1000").unwrap();
    assert!(Config::load_from_file(file.path()).is_err());
}

#[test]
fn test_generate_default_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# todolist configuration file"));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.api.base_url, DEFAULT_API_URL);
    assert_eq!(loaded.display.default_sort, SortOption::Creation);
}

#[test]
fn test_session_path_override() {
    let mut config = Config::default();
    config.session.path = Some("/tmp/todolist-test/session.json".into());
    assert_eq!(
        config.session_path().unwrap(),
        std::path::PathBuf::from("/tmp/todolist-test/session.json")
    );
}
