use grep_filter::config::{Config, ConfigError, LogLevel};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.script_name, "grep_filter");
    assert_eq!(config.indicator_label, "grep");
    assert_eq!(config.log_level, LogLevel::Off);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_builders() {
    let config = Config::new()
        .with_script_name("isearch")
        .with_indicator_label("search")
        .with_log_level(LogLevel::Debug);
    assert_eq!(config.script_name, "isearch");
    assert_eq!(config.indicator_label, "search");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_config_partial_yaml_fills_defaults() {
    let config = Config::from_yaml("indicator_label: \"[grep]\"\nlog_level: info\n").unwrap();
    assert_eq!(config.indicator_label, "[grep]");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.script_name, "grep_filter");
}

#[test]
fn test_config_empty_yaml_is_default() {
    assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
}

#[test]
fn test_config_yaml_serialization() {
    let config = Config::default().with_indicator_label("g");
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("indicator_label: g"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_config_invalid_yaml_is_parse_error() {
    let err = Config::from_yaml("script_name: [unterminated").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_unknown_log_level_is_parse_error() {
    let err = Config::from_yaml("log_level: chatty").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_validation_rejects_bad_script_name() {
    for name in ["", "grep filter", "grep,filter"] {
        let config = Config::default().with_script_name(name);
        assert!(
            matches!(config.validate(), Err(ConfigError::Validation(_))),
            "script_name {name:?} should be rejected"
        );
    }
}

#[test]
fn test_config_validation_rejects_empty_label() {
    assert!(Config::default().with_indicator_label("").validate().is_err());
}

#[test]
fn test_config_validation_runs_on_load() {
    let err = Config::from_yaml("script_name: \"two words\"").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_config_save_and_load_from_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = Config::default()
        .with_script_name("isearch")
        .with_log_level(LogLevel::Trace);

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_load_from_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_config_load_from_invalid_file_keeps_typed_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "indicator_label: \"\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation(_))
    ));
}

#[test]
fn test_config_path_is_under_config_dir() {
    assert!(Config::config_path().starts_with(Config::config_dir()));
    assert!(Config::config_path().ends_with("config.yaml"));
}
