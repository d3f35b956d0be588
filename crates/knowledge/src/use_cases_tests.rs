use super::*;
use crate::errors::{KnowledgeError, StrategyNamespace};
use crate::exporters::{exporter_factory, ExporterArgs, HashExporter};
use crate::getters::{getter_factory, KeyValueGetter};
use crate::setters::{setter_factory, ExporterSetter};
use serde_json::json;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn knowledge() -> Knowledge {
    Knowledge::with_store(KnowledgeConfig::default(), SettingsStore::new())
}

#[test]
fn test_learn_from_defaults_to_store() {
    let knowledge = knowledge();

    knowledge
        .learn_from("hash", json!({"foo": "bar"}), "default")
        .expect("learned");

    assert_eq!(knowledge.store().get("foo"), Some(json!("bar")));
}

#[test]
fn test_learn_from_uses_configured_environment() {
    let knowledge = Knowledge::with_store(
        KnowledgeConfig::default().with_environment("production"),
        SettingsStore::new(),
    );

    knowledge
        .learn_from(
            "key_value",
            json!({"staging": {"key": "s"}, "production": {"key": "p"}}),
            "knowledge",
        )
        .expect("learned");

    assert_eq!(knowledge.store().get("key"), Some(json!("p")));
}

#[test]
fn test_export_learnings_from_defers_format() {
    let knowledge = knowledge();

    let mut export = knowledge
        .export_learnings_from("hash", json!({"foo": "bar", "n": 1}))
        .expect("learned");

    assert!(knowledge.store().is_empty());
    assert_eq!(export.format(), None);

    let exported = export.retarget("json", None).expect("exported");
    let parsed: VariableMap =
        serde_json::from_str(exported.as_text().expect("text")).expect("valid json");
    assert_eq!(parsed, export.data().clone());
}

#[test]
fn test_export_learnings_without_format_is_unknown() {
    let knowledge = knowledge();
    let export = knowledge
        .export_learnings_from("hash", json!({"foo": "bar"}))
        .expect("learned");

    let result = export.call();

    assert!(matches!(
        result,
        Err(ref e) if e.is_unknown_in(StrategyNamespace::Exporter)
    ));
}

#[test]
fn test_export_in_writes_store_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("settings.yml");
    let knowledge = knowledge();
    knowledge.store().set("foo", json!("bar"));

    let exported = knowledge
        .export_in("yaml", Some(path.clone()))
        .expect("exported");

    let written = fs::read_to_string(&path).expect("export written");
    assert_eq!(exported.as_text(), Some(written.as_str()));
    assert_eq!(written, "foo: bar\n");
}

#[test]
fn test_export_in_hash() {
    let knowledge = knowledge();
    knowledge.store().set("foo", json!("bar"));

    let exported = knowledge.export_in("hash", None).expect("exported");

    assert_eq!(exported.as_map(), Some(&knowledge.store().snapshot()));
}

#[test]
fn test_export_in_unknown_format() {
    let result = knowledge().export_in("xml", None);

    assert_eq!(
        result,
        Err(KnowledgeError::UnknownStrategy {
            namespace: StrategyNamespace::Exporter,
            name: "Xml".to_string(),
        })
    );
}

#[test]
fn test_registered_strategies_are_resolved() {
    let mut knowledge = knowledge();
    knowledge
        .register_getter(
            "static_map",
            getter_factory(|_| {
                Ok(KeyValueGetter::new(
                    &VariableMap::from([("fixed".to_string(), json!(true))]),
                    None,
                ))
            }),
        )
        .register_setter(
            "discard",
            setter_factory(|_| ExporterSetter::new(VariableMap::new())),
        )
        .register_exporter("raw", exporter_factory(|args: ExporterArgs| HashExporter::new(args.data)));

    let learned = knowledge
        .learn_from("StaticMap", Value::Null, "exporter")
        .expect("custom getter");
    let discarded = knowledge
        .learn_from("static-map", Value::Null, "discard")
        .expect("custom setter");
    let exported = knowledge.export_in("RAW", None).expect("custom exporter");

    assert_eq!(learned.get("fixed"), Some(&json!(true)));
    assert!(discarded.is_empty());
    assert!(exported.as_map().is_some());
}

#[test]
fn test_registration_does_not_leak_into_clones() {
    let original = knowledge();
    let mut extended = original.clone();

    extended.register_getter(
        "extra",
        getter_factory(|_| Ok(KeyValueGetter::new(&VariableMap::new(), None))),
    );

    assert!(extended.getters().contains("extra"));
    assert!(!original.getters().contains("extra"));
}

#[test]
#[serial]
fn test_learn_from_env_with_raise_param() {
    env::remove_var("KNOWLEDGE_TEST_USE_CASE_MISSING");
    let knowledge = knowledge();
    let variables = json!({"foo": ["KNOWLEDGE_TEST_USE_CASE_MISSING", "fallback"]});
    let params = VariableMap::from([("raise_on_value_not_found".to_string(), json!(true))]);

    let lenient = knowledge
        .learn_from("env", variables.clone(), "exporter")
        .expect("default applies");
    let strict = knowledge.learn_from_with_params("env", variables.clone(), params.clone(), "default");
    let export = knowledge.export_learnings_from_with_params("env", variables, params);

    assert_eq!(lenient.get("foo"), Some(&json!("fallback")));
    let missing = KnowledgeError::ValueNotFound {
        variable: "foo".to_string(),
        env_var: "KNOWLEDGE_TEST_USE_CASE_MISSING".to_string(),
    };
    assert_eq!(strict, Err(missing.clone()));
    assert_eq!(export.err(), Some(missing));
    assert!(knowledge.store().is_empty());
}
