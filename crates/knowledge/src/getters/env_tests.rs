use super::*;
use serde_json::json;
use serial_test::serial;

fn descriptor(value: Value) -> VariableMap {
    serde_json::from_value(value).expect("descriptor must be a map")
}

#[test]
#[serial]
fn test_reads_environment_variables() {
    env::set_var("KNOWLEDGE_TEST_BAR", "env_bar");
    env::set_var("KNOWLEDGE_TEST_BAZ", "env_baz");

    let getter = EnvGetter::new(
        &descriptor(json!({"foo": "KNOWLEDGE_TEST_BAR", "bar": "KNOWLEDGE_TEST_BAZ"})),
        None,
    );
    let data = getter.call().expect("variables are set");

    assert_eq!(data.get("foo"), Some(&json!("env_bar")));
    assert_eq!(data.get("bar"), Some(&json!("env_baz")));

    env::remove_var("KNOWLEDGE_TEST_BAR");
    env::remove_var("KNOWLEDGE_TEST_BAZ");
}

#[test]
#[serial]
fn test_missing_variable_falls_back_to_null() {
    env::remove_var("KNOWLEDGE_TEST_MISSING");

    let getter = EnvGetter::new(
        &descriptor(json!({"foo": ["KNOWLEDGE_TEST_MISSING", null]})),
        None,
    );

    let data = getter.call().expect("missing values are tolerated");

    assert_eq!(data, VariableMap::from([("foo".to_string(), Value::Null)]));
}

#[test]
#[serial]
fn test_missing_variable_uses_bundled_default() {
    env::remove_var("KNOWLEDGE_TEST_MISSING");

    let getter = EnvGetter::new(
        &descriptor(json!({"pool": ["KNOWLEDGE_TEST_MISSING", 5]})),
        None,
    );

    let data = getter.call().expect("default applies");

    assert_eq!(data.get("pool"), Some(&json!(5)));
}

#[test]
#[serial]
fn test_raise_on_value_not_found_overrides_default() {
    env::remove_var("KNOWLEDGE_TEST_MISSING");

    let getter = EnvGetter::new(
        &descriptor(json!({"foo": ["KNOWLEDGE_TEST_MISSING", "fallback"]})),
        None,
    )
    .raise_on_value_not_found(true);

    assert_eq!(
        getter.call(),
        Err(KnowledgeError::ValueNotFound {
            variable: "foo".to_string(),
            env_var: "KNOWLEDGE_TEST_MISSING".to_string(),
        })
    );
}

#[test]
#[serial]
fn test_scopes_descriptor_to_environment() {
    env::set_var("KNOWLEDGE_TEST_PROD_URL", "postgres://prod");

    let args = GetterArgs::new(
        json!({
            "production": {"url": "KNOWLEDGE_TEST_PROD_URL"},
            "development": {"url": "KNOWLEDGE_TEST_DEV_URL"},
        }),
        Some("production"),
    );
    let data = EnvGetter::from_args(args)
        .and_then(|getter| getter.call())
        .expect("production branch");

    assert_eq!(data.get("url"), Some(&json!("postgres://prod")));

    env::remove_var("KNOWLEDGE_TEST_PROD_URL");
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_value_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    env::set_var("KNOWLEDGE_TEST_BYTES", OsStr::from_bytes(&[0x66, 0xff, 0x6f]));
    let getter = EnvGetter::new(&descriptor(json!({"v": "KNOWLEDGE_TEST_BYTES"})), None);

    let result = getter.call();
    env::remove_var("KNOWLEDGE_TEST_BYTES");

    assert_eq!(
        result,
        Err(KnowledgeError::ValueNotUnicode {
            variable: "v".to_string(),
            env_var: "KNOWLEDGE_TEST_BYTES".to_string(),
        })
    );
}

#[test]
#[serial]
fn test_raise_on_value_not_found_from_params() {
    env::remove_var("KNOWLEDGE_TEST_MISSING");

    let args = GetterArgs::new(json!({"foo": ["KNOWLEDGE_TEST_MISSING", 1]}), None).with_params(
        VariableMap::from([("raise_on_value_not_found".to_string(), json!("yes"))]),
    );
    let result = EnvGetter::from_args(args).and_then(|getter| getter.call());

    assert_eq!(
        result,
        Err(KnowledgeError::ValueNotFound {
            variable: "foo".to_string(),
            env_var: "KNOWLEDGE_TEST_MISSING".to_string(),
        })
    );
}

#[test]
fn test_invalid_entry_is_rejected() {
    let getter = EnvGetter::new(&descriptor(json!({"foo": 12})), None);

    assert!(matches!(
        getter.call(),
        Err(KnowledgeError::LearnError { .. })
    ));
}

#[test]
fn test_entry_parsing() {
    assert_eq!(
        EnvEntry::parse("a", &json!("A")).expect("string entry"),
        EnvEntry {
            env_var: "A".to_string(),
            default: Value::Null
        }
    );
    assert_eq!(
        EnvEntry::parse("a", &json!(["A"])).expect("single element entry"),
        EnvEntry {
            env_var: "A".to_string(),
            default: Value::Null
        }
    );
    assert!(EnvEntry::parse("a", &json!(["A", 1, 2])).is_err());
    assert!(EnvEntry::parse("a", &json!([1, 2])).is_err());
}
