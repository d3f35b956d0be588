use super::*;

#[test]
fn test_builtin_names_resolve_to_their_entry() {
    for (name, registered, strategy) in [
        ("default", "default", "KeyValue"),
        ("keyval", "default", "KeyValue"),
        ("key_value", "default", "KeyValue"),
        ("env", "environment", "Environment"),
        ("environment", "environment", "Environment"),
        ("env_vars", "environment", "Environment"),
        ("config", "file", "File"),
        ("file", "file", "File"),
        ("config_file", "file", "File"),
    ] {
        let entry = find_default_adapter(name).expect("builtin default adapter");

        assert_eq!(entry.registered_name(), registered, "name {}", name);
        assert_eq!(entry.strategy().name(), strategy, "name {}", name);
    }
}

#[test]
fn test_unknown_name_is_a_register_error() {
    let result = find_default_adapter("ssm");

    assert_eq!(
        result,
        Err(KnowledgeError::RegisterError {
            name: "ssm".to_string()
        })
    );
}

#[test]
fn test_registered_adapter_is_found_by_every_name() {
    register_default_adapter(
        &["test_vault", "test_secrets"],
        AdapterStrategy::key_value(),
    )
    .expect("registration");

    let entry = find_default_adapter("test_secrets").expect("registered adapter");

    assert_eq!(entry.registered_name(), "test_vault");
    assert!(default_adapter_names().contains(&"test_vault".to_string()));
}

#[test]
fn test_later_registration_takes_over_names() {
    register_default_adapter(&["test_first", "test_shared"], AdapterStrategy::key_value())
        .expect("first registration");
    register_default_adapter(&["test_second", "test_shared"], AdapterStrategy::file())
        .expect("second registration");

    let shared = find_default_adapter("test_shared").expect("shared name");
    let first = find_default_adapter("test_first").expect("first name kept");

    assert_eq!(shared.registered_name(), "test_second");
    assert_eq!(shared.strategy().name(), "File");
    assert_eq!(first.names(), ["test_first".to_string()]);
}

#[test]
fn test_empty_name_list_is_refused() {
    let result = register_default_adapter(&[], AdapterStrategy::key_value());

    assert!(matches!(result, Err(KnowledgeError::RegisterError { .. })));
}
