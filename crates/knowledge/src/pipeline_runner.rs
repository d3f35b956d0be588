//! Fan-out of a learner's enabled adapters against one destination.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::adapters::{AdapterArgs, AdapterStrategy};
use crate::errors::{KnowledgeResult, StrategyNamespace};
use crate::resolver::ensure_invokable;
use crate::variable_setter::VariableSetter;
use crate::variables::{as_variable_map, VariableMap};

#[cfg(test)]
#[path = "pipeline_runner_tests.rs"]
mod tests;

/// Instantiates and runs every given adapter exactly once.
///
/// Each adapter receives the entry of `params` and `variables` keyed by its
/// name when that entry is a map. Otherwise it receives the shared map, minus
/// the entries keyed by an adapter name. Adapters run sequentially; the first
/// failure stops the run and earlier adapters' writes are kept.
#[derive(Debug, Clone, Copy)]
pub struct PipelineRunner<'a> {
    adapters: &'a BTreeMap<String, AdapterStrategy>,
    adapter_names: &'a BTreeMap<String, AdapterStrategy>,
    params: &'a VariableMap,
    variables: &'a VariableMap,
    environment: Option<&'a str>,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(
        adapters: &'a BTreeMap<String, AdapterStrategy>,
        params: &'a VariableMap,
        variables: &'a VariableMap,
        environment: Option<&'a str>,
    ) -> Self {
        Self {
            adapters,
            adapter_names: adapters,
            params,
            variables,
            environment,
        }
    }

    /// Also withholds the entries named after any of `adapters` from the
    /// shared maps, not only those of the adapters being run.
    pub fn with_adapter_names(mut self, adapters: &'a BTreeMap<String, AdapterStrategy>) -> Self {
        self.adapter_names = adapters;
        self
    }

    /// Runs every adapter against `setter`. An empty adapter set does nothing.
    #[instrument(skip_all, fields(adapters = self.adapters.len()))]
    pub fn run(&self, setter: &mut dyn VariableSetter) -> KnowledgeResult<()> {
        for (name, strategy) in self.adapters {
            let args = AdapterArgs {
                params: self.select(self.params, name),
                variables: self.select(self.variables, name),
                environment: self.environment.map(str::to_string),
            };

            debug!("Running adapter '{}' ({})", name, strategy.name());
            let adapter = strategy.instantiate(args)?;
            let adapter = ensure_invokable(StrategyNamespace::Adapter, strategy.name(), adapter)?;
            adapter.run(setter)?;
        }

        info!("Ran {} adapters", self.adapters.len());
        Ok(())
    }

    fn select(&self, map: &VariableMap, name: &str) -> VariableMap {
        match map.get(name) {
            Some(value @ Value::Object(_)) => as_variable_map(value).unwrap_or_default(),
            _ => map
                .iter()
                .filter(|(key, _)| {
                    !self.adapters.contains_key(*key) && !self.adapter_names.contains_key(*key)
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}
