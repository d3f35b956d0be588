//! One-shot "learn from one source, apply to one destination" operation.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::KnowledgeConfig;
use crate::errors::{KnowledgeResult, StrategyNamespace};
use crate::getters::{GetterArgs, GetterFactory};
use crate::resolver::{ensure_invokable, StrategyRegistry};
use crate::setters::{SetterArgs, SetterFactory};
use crate::settings_store::SettingsStore;
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;

/// Resolves a source and a destination by name and runs them in sequence.
///
/// The source runs to completion before the destination is even built; the
/// destination receives the complete map.
#[derive(Debug, Clone)]
pub struct SingleOperation {
    getters: Arc<StrategyRegistry<GetterFactory>>,
    setters: Arc<StrategyRegistry<SetterFactory>>,
    config: KnowledgeConfig,
    store: SettingsStore,
}

impl SingleOperation {
    pub fn new(
        getters: Arc<StrategyRegistry<GetterFactory>>,
        setters: Arc<StrategyRegistry<SetterFactory>>,
        config: KnowledgeConfig,
        store: SettingsStore,
    ) -> Self {
        Self {
            getters,
            setters,
            config,
            store,
        }
    }

    /// Reads `variables` through the `source` strategy and hands the result
    /// to the `destination` strategy, returning what the destination returns.
    ///
    /// # Errors
    ///
    /// - [`KnowledgeError::UnknownStrategy`](crate::KnowledgeError::UnknownStrategy)
    ///   when either name cannot be resolved
    /// - [`KnowledgeError::NotCallable`](crate::KnowledgeError::NotCallable)
    ///   when the resolved strategy is abstract
    /// - any error raised by the source or the destination
    pub fn run(
        &self,
        source: &str,
        variables: Value,
        destination: &str,
    ) -> KnowledgeResult<VariableMap> {
        self.run_with_params(source, variables, VariableMap::new(), destination)
    }

    /// Same as [`run`](Self::run), handing `params` to the source strategy.
    #[instrument(skip(self, variables, params))]
    pub fn run_with_params(
        &self,
        source: &str,
        variables: Value,
        params: VariableMap,
        destination: &str,
    ) -> KnowledgeResult<VariableMap> {
        let getter = self.getters.resolve(source)?;
        let args = GetterArgs::new(variables, self.config.environment()).with_params(params);
        let instance =
            ensure_invokable(StrategyNamespace::Getter, getter.name, (getter.factory)(args)?)?;
        let data = instance.call()?;
        debug!("Source {} produced {} variables", getter.name, data.len());

        let setter = self.setters.resolve(destination)?;
        let args = SetterArgs {
            data,
            store: self.store.clone(),
        };
        let instance =
            ensure_invokable(StrategyNamespace::Setter, setter.name, (setter.factory)(args))?;
        instance.call()
    }
}
