//! Tests for knowledge error types.

use super::*;

#[test]
fn unknown_strategy_message_names_namespace_and_role() {
    let error = KnowledgeError::unknown(StrategyNamespace::Getter, "Ghost");

    assert_eq!(
        error.to_string(),
        "Unknown source strategy: cannot find Getters::Ghost"
    );
}

#[test]
fn unknown_strategy_is_namespace_specific() {
    let error = KnowledgeError::unknown(StrategyNamespace::Exporter, "Xml");

    assert!(error.is_unknown_in(StrategyNamespace::Exporter));
    assert!(!error.is_unknown_in(StrategyNamespace::Setter));
    assert!(!KnowledgeError::learn("boom").is_unknown_in(StrategyNamespace::Exporter));
}

#[test]
fn namespace_roles() {
    assert_eq!(StrategyNamespace::Getter.role(), "source");
    assert_eq!(StrategyNamespace::Setter.role(), "destination");
    assert_eq!(StrategyNamespace::Exporter.role(), "exporter");
    assert_eq!(StrategyNamespace::Adapter.role(), "adapter");
}

#[test]
fn adapter_not_found_message() {
    let error = KnowledgeError::AdapterNotFound {
        name: "ghost".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Cannot find \"ghost\" in available adapters"
    );
}

#[test]
fn value_not_found_fields() {
    let error = KnowledgeError::ValueNotFound {
        variable: "foo".to_string(),
        env_var: "BAR".to_string(),
    };

    match error {
        KnowledgeError::ValueNotFound { variable, env_var } => {
            assert_eq!(variable, "foo");
            assert_eq!(env_var, "BAR");
        }
        _ => panic!("Expected ValueNotFound"),
    }
}

#[test]
fn errors_are_comparable() {
    let first = KnowledgeError::learn("invalid descriptor");
    let second = KnowledgeError::learn("invalid descriptor");

    assert_eq!(first, second);
    assert_eq!(first.clone(), second);
}
