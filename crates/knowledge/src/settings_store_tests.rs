use super::*;
use serde_json::json;

#[test]
fn test_set_creates_then_overwrites() {
    let store = SettingsStore::new();

    store.set("foo", json!("bar"));
    assert_eq!(store.get("foo"), Some(json!("bar")));

    store.set("foo", json!("baz"));
    assert_eq!(store.get("foo"), Some(json!("baz")));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clones_share_state() {
    let store = SettingsStore::new();
    let handle = store.clone();

    handle.set("shared", json!(true));

    assert!(store.contains("shared"));
}

#[test]
fn test_reset_restores_defaults() {
    let store = SettingsStore::new();
    store.define_setting("environment", json!("development"));
    store.set("environment", json!("production"));
    store.set("other", json!(1));

    store.reset();

    assert_eq!(store.get("environment"), Some(json!("development")));
    assert!(!store.contains("other"));
}

#[test]
fn test_apply_and_snapshot() {
    let store = SettingsStore::new();
    let data = VariableMap::from([
        ("a".to_string(), json!(1)),
        ("b".to_string(), json!(2)),
    ]);

    store.apply(&data);

    assert_eq!(store.snapshot(), data);
}

#[test]
fn test_variable_setter_contract() {
    let mut store = SettingsStore::new();

    VariableSetter::set(&mut store, "foo", json!("bar")).expect("store never fails");

    assert_eq!(store.get("foo"), Some(json!("bar")));
}

#[test]
fn test_new_store_is_independent_from_global() {
    let store = SettingsStore::new();
    store.set("isolated_setting_key", json!(1));

    assert!(!SettingsStore::global().contains("isolated_setting_key"));
    assert!(!store.is_empty());
}
