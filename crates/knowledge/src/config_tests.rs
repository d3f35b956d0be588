use super::*;

#[test]
fn test_default_environment_is_development() {
    let config = KnowledgeConfig::default();

    assert_eq!(config.environment(), Some(DEFAULT_ENVIRONMENT));
}

#[test]
fn test_with_and_without_environment() {
    let config = KnowledgeConfig::default().with_environment("staging");
    assert_eq!(config.environment(), Some("staging"));

    let config = config.without_environment();
    assert_eq!(config.environment(), None);
}

#[test]
fn test_deserialize_missing_environment_uses_default() {
    let config: KnowledgeConfig = serde_json::from_str("{}").expect("valid config");

    assert_eq!(config.environment(), Some("development"));
}

#[test]
fn test_deserialize_explicit_null_disables_environment() {
    let config: KnowledgeConfig =
        serde_json::from_str(r#"{"environment": null}"#).expect("valid config");

    assert_eq!(config, KnowledgeConfig::new(None));
}
