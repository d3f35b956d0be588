use super::*;
use knowledge::KnowledgeError;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert_eq!(config.environment, "development");
    assert_eq!(config.adapters, vec![AdapterConfig::new("default")]);
    assert!(config.variables.is_none());
    assert!(config.backup.is_none());
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = write_config(&temp_dir, "invalid = toml = syntax");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_knowledge.toml");
    let result = AppConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_full_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = write_config(
        &temp_dir,
        r#"
environment = "production"
variables = "variables.yml"
backup = "backup.yml"

[[adapters]]
name = "env"

[adapters.variables]
database_url = "DATABASE_URL"
pool_size = ["POOL_SIZE", 5]

[adapters.params]
raise_on_value_not_found = true

[[adapters]]
name = "default"
enabled = false
"#,
    );

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(config.environment, "production");
    assert_eq!(config.variables, Some(json!("variables.yml")));
    assert_eq!(config.backup, Some(PathBuf::from("backup.yml")));
    assert_eq!(config.adapters.len(), 2);
    assert_eq!(config.adapters[0].name, "env");
    assert!(config.adapters[0].enabled);
    assert_eq!(
        config.adapters[0].variables,
        Some(json!({"database_url": "DATABASE_URL", "pool_size": ["POOL_SIZE", 5]}))
    );
    assert_eq!(
        config.adapters[0].params,
        Some(VariableMap::from([(
            "raise_on_value_not_found".to_string(),
            json!(true)
        )]))
    );
    assert!(!config.adapters[1].enabled);
}

#[test]
fn test_app_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("knowledge.toml");

    let mut original = AppConfig::default();
    original.environment = "staging".to_string();
    original.backup = Some(PathBuf::from("out.yml"));

    original.save(&config_path).expect("Failed to save config");
    let loaded = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(loaded, original);
}

#[test]
fn test_learner_registers_configured_adapters() {
    let mut env_adapter = AdapterConfig::new("env_vars");
    env_adapter.params = Some(VariableMap::from([(
        "raise_on_value_not_found".to_string(),
        json!(true),
    )]));
    env_adapter.variables = Some(json!({"home": "HOME"}));

    let mut file_adapter = AdapterConfig::new("config");
    file_adapter.enabled = false;

    let config = AppConfig {
        environment: "production".to_string(),
        variables: Some(json!({"production": {"foo": "bar"}})),
        backup: None,
        adapters: vec![env_adapter, file_adapter],
    };

    let learner = config.learner().expect("learner");

    assert_eq!(learner.config().environment(), Some("production"));
    assert!(learner.available_adapters().contains_key("environment"));
    assert!(learner.available_adapters().contains_key("file"));
    assert!(learner.enabled_adapters().contains_key("environment"));
    assert!(!learner.enabled_adapters().contains_key("file"));
    assert_eq!(
        learner.additional_params().get("environment"),
        Some(&json!({"raise_on_value_not_found": true}))
    );
    assert_eq!(
        learner.variables().get("environment"),
        Some(&json!({"home": "HOME"}))
    );
    assert_eq!(
        learner.variables().get("production"),
        Some(&json!({"foo": "bar"}))
    );
}

#[test]
fn test_learner_rejects_unknown_adapter() {
    let config = AppConfig {
        adapters: vec![AdapterConfig::new("ssm")],
        ..AppConfig::default()
    };

    let result = config.learner();

    assert!(matches!(
        result,
        Err(Error::Knowledge(KnowledgeError::RegisterError { .. }))
    ));
}

#[test]
fn test_learner_rejects_scalar_variables() {
    let config = AppConfig {
        variables: Some(json!(42)),
        ..AppConfig::default()
    };

    let result = config.learner();

    assert!(matches!(
        result,
        Err(Error::Knowledge(KnowledgeError::LearnError { .. }))
    ));
}

#[test]
fn test_get_config_path_prefers_argument() {
    assert_eq!(
        get_config_path(Some("custom.toml")),
        PathBuf::from("custom.toml")
    );
    assert!(get_config_path(None).ends_with(DEFAULT_CONFIG_FILENAME));
}
