//! Destination strategies ("setters").
//!
//! A setter is built from the flat map produced by a getter and applies it when
//! called: [`KnowledgeSetter`] writes every entry into a [`SettingsStore`],
//! [`ExporterSetter`] hands the map back untouched so it can be exported.

use std::sync::Arc;

use crate::errors::{KnowledgeError, KnowledgeResult, StrategyNamespace};
use crate::resolver::{Invokable, StrategyRegistry};
use crate::settings_store::SettingsStore;
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "setters_tests.rs"]
mod tests;

/// A destination strategy.
pub trait Setter: Invokable + Send {
    /// Applies the data and returns what was applied.
    fn call(&self) -> KnowledgeResult<VariableMap>;
}

/// Construction input of a setter.
#[derive(Debug, Clone)]
pub struct SetterArgs {
    pub data: VariableMap,
    /// Store written by destinations that mutate shared settings.
    pub store: SettingsStore,
}

/// Builds a setter from its arguments.
pub type SetterFactory = Arc<dyn Fn(SetterArgs) -> Box<dyn Setter> + Send + Sync>;

/// Wraps a typed constructor into a [`SetterFactory`].
pub fn setter_factory<S, F>(constructor: F) -> SetterFactory
where
    S: Setter + 'static,
    F: Fn(SetterArgs) -> S + Send + Sync + 'static,
{
    Arc::new(move |args| Box::new(constructor(args)) as Box<dyn Setter>)
}

/// Registry of the setters shipped with the crate: `knowledge` and its alias
/// `default`, `exporter`, and the non-invokable `base`.
pub fn builtin_setters() -> StrategyRegistry<SetterFactory> {
    let mut registry = StrategyRegistry::new(StrategyNamespace::Setter);

    let knowledge = setter_factory(|args: SetterArgs| KnowledgeSetter::new(args.data, args.store));

    registry
        .register("knowledge", knowledge.clone())
        .register("default", knowledge)
        .register("exporter", setter_factory(|args: SetterArgs| ExporterSetter::new(args.data)))
        .register("base", setter_factory(|_| BaseSetter));

    registry
}

/// Writes every entry into a settings store, creating missing settings.
#[derive(Debug, Clone)]
pub struct KnowledgeSetter {
    data: VariableMap,
    store: SettingsStore,
}

impl KnowledgeSetter {
    pub fn new(data: VariableMap, store: SettingsStore) -> Self {
        Self { data, store }
    }
}

impl Invokable for KnowledgeSetter {}

impl Setter for KnowledgeSetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        self.store.apply(&self.data);
        Ok(self.data.clone())
    }
}

/// Returns its input untouched, without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ExporterSetter {
    data: VariableMap,
}

impl ExporterSetter {
    pub fn new(data: VariableMap) -> Self {
        Self { data }
    }
}

impl Invokable for ExporterSetter {}

impl Setter for ExporterSetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        Ok(self.data.clone())
    }
}

/// Abstract base of the destination strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseSetter;

impl Invokable for BaseSetter {
    fn is_invokable(&self) -> bool {
        false
    }
}

impl Setter for BaseSetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        Err(KnowledgeError::NotImplemented {
            strategy: "Setters::Base".to_string(),
        })
    }
}
