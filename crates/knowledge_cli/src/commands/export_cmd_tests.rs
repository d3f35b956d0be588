use super::*;
use knowledge::{KnowledgeError, SettingsStore, StrategyNamespace};
use std::fs;
use tempfile::TempDir;

fn args(format: &str, destination: Option<PathBuf>) -> ExportArgs {
    ExportArgs {
        source: "hash".to_string(),
        variables: r#"{"foo": "bar"}"#.to_string(),
        params: "{}".to_string(),
        format: format.to_string(),
        destination,
        environment: None,
    }
}

fn knowledge() -> Knowledge {
    Knowledge::with_store(KnowledgeConfig::default(), SettingsStore::new())
}

#[test]
fn test_export_as_json() {
    let output = execute(&args("json", None), &knowledge()).expect("exported");

    assert_eq!(output, r#"{"foo":"bar"}"#);
}

#[test]
fn test_export_hash_is_rendered_as_json() {
    let output = execute(&args("hash", None), &knowledge()).expect("exported");

    assert_eq!(output, "{\n  \"foo\": \"bar\"\n}");
}

#[test]
fn test_export_writes_destination() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("export.yml");
    let knowledge = knowledge();

    let output = execute(&args("yaml", Some(path.clone())), &knowledge).expect("exported");

    assert_eq!(fs::read_to_string(&path).expect("written"), output);
    assert!(knowledge.store().is_empty());
}

#[test]
fn test_export_unknown_format() {
    let result = execute(&args("xml", None), &knowledge());

    match result {
        Err(Error::Knowledge(error)) => {
            assert!(error.is_unknown_in(StrategyNamespace::Exporter));
        }
        other => panic!("Expected unknown exporter, got {:?}", other),
    }
}

#[test]
fn test_export_source_error() {
    let mut args = args("json", None);
    args.source = "json".to_string();

    let result = execute(&args, &knowledge());

    assert!(matches!(
        result,
        Err(Error::Knowledge(KnowledgeError::LearnError { .. }))
    ));
}
