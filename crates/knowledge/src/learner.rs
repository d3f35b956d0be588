//! Stateful orchestration of adapters.
//!
//! A [`Learner`] keeps a registry of named adapters, split between the ones
//! that are available and the ones that are enabled, together with the
//! variables and extra parameters each adapter receives. [`Learner::gather`]
//! runs every enabled adapter against the learner's destination;
//! [`Learner::backup`] runs them against a [`Backupper`] instead and writes the
//! result to a YAML file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::adapters::AdapterStrategy;
use crate::backupper::Backupper;
use crate::config::KnowledgeConfig;
use crate::default_adapters::find_default_adapter;
use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::pipeline_runner::PipelineRunner;
use crate::scope::scope;
use crate::settings_store::SettingsStore;
use crate::variable_setter::VariableSetter;
use crate::variables::{as_variable_map, read_map_file, FileFormat, VariableMap, VariablesSource};

#[cfg(test)]
#[path = "learner_tests.rs"]
mod tests;

/// Registry of adapters plus everything needed to run them.
///
/// # Examples
///
/// ```
/// use knowledge::{KnowledgeConfig, Learner, SettingsStore, VariableMap};
/// use serde_json::json;
///
/// let store = SettingsStore::new();
/// let mut learner = Learner::with_config(KnowledgeConfig::default());
/// learner.set_setter(Box::new(store.clone()));
///
/// learner.use_adapter("default", true)?;
/// learner.set_variables(VariableMap::from([("foo".to_string(), json!("bar"))]))?;
/// learner.gather()?;
///
/// assert_eq!(store.get("foo"), Some(json!("bar")));
/// # Ok::<(), knowledge::KnowledgeError>(())
/// ```
pub struct Learner {
    config: KnowledgeConfig,
    additional_params: VariableMap,
    available_adapters: BTreeMap<String, AdapterStrategy>,
    enabled_adapters: BTreeMap<String, AdapterStrategy>,
    variables: VariableMap,
    setter: Box<dyn VariableSetter>,
}

impl Learner {
    /// Creates a learner for the default environment, applying to the global
    /// settings store.
    pub fn new() -> Self {
        Self::with_config(KnowledgeConfig::default())
    }

    pub fn with_config(config: KnowledgeConfig) -> Self {
        Self {
            config,
            additional_params: VariableMap::new(),
            available_adapters: BTreeMap::new(),
            enabled_adapters: BTreeMap::new(),
            variables: VariableMap::new(),
            setter: Box::new(SettingsStore::global()),
        }
    }

    pub fn config(&self) -> &KnowledgeConfig {
        &self.config
    }

    pub fn available_adapters(&self) -> &BTreeMap<String, AdapterStrategy> {
        &self.available_adapters
    }

    pub fn enabled_adapters(&self) -> &BTreeMap<String, AdapterStrategy> {
        &self.enabled_adapters
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Extra parameters, keyed by adapter name.
    pub fn additional_params(&self) -> &VariableMap {
        &self.additional_params
    }

    /// Replaces the destination adapters write to during [`gather`](Self::gather).
    pub fn set_setter(&mut self, setter: Box<dyn VariableSetter>) {
        self.setter = setter;
    }

    /// Runs every enabled adapter against the destination.
    #[instrument(skip(self), fields(environment = ?self.config.environment()))]
    pub fn gather(&mut self) -> KnowledgeResult<()> {
        info!("Gathering knowledge from {} adapters", self.enabled_adapters.len());

        PipelineRunner::new(
            &self.enabled_adapters,
            &self.additional_params,
            &self.variables,
            self.config.environment(),
        )
        .with_adapter_names(&self.available_adapters)
        .run(self.setter.as_mut())
    }

    /// Runs every enabled adapter against a [`Backupper`] and writes what they
    /// produced to `path`. The learner's own destination is left untouched.
    #[instrument(skip(self, path), fields(path = ?path.as_ref()))]
    pub fn backup(&self, path: impl AsRef<Path>) -> KnowledgeResult<()> {
        let mut backupper = Backupper::new(path.as_ref());

        PipelineRunner::new(
            &self.enabled_adapters,
            &self.additional_params,
            &self.variables,
            self.config.environment(),
        )
        .with_adapter_names(&self.available_adapters)
        .run(&mut backupper)?;

        backupper.backup()
    }

    /// Sets one extra parameter for the adapter registered as `adapter`.
    pub fn add_adapter_param(&mut self, adapter: &str, name: impl Into<String>, value: Value) {
        self.add_adapter_params(adapter, VariableMap::from([(name.into(), value)]));
    }

    /// Merges `params` into the extra parameters of `adapter`.
    pub fn add_adapter_params(&mut self, adapter: &str, params: VariableMap) {
        let mut merged = self
            .additional_params
            .get(adapter)
            .and_then(as_variable_map)
            .unwrap_or_default();
        merged.extend(params);

        self.additional_params
            .insert(adapter.to_string(), Value::Object(merged.into_iter().collect()));
    }

    /// Makes `strategy` available as `name`, replacing any previous
    /// registration of that name.
    #[instrument(skip(self, strategy, variables), fields(strategy = strategy.name()))]
    pub fn register_adapter(
        &mut self,
        name: &str,
        strategy: AdapterStrategy,
        enable: bool,
        variables: Option<VariablesSource>,
    ) -> KnowledgeResult<()> {
        debug!("Registering adapter '{}'", name);
        self.available_adapters.insert(name.to_string(), strategy);

        if enable {
            self.enable_adapter(name, None)?;
        }
        if let Some(variables) = variables {
            self.set_adapter_variables(name, variables)?;
        }
        Ok(())
    }

    /// Enables an available adapter.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::AdapterNotFound`] when `name` was never registered.
    pub fn enable_adapter(
        &mut self,
        name: &str,
        variables: Option<VariablesSource>,
    ) -> KnowledgeResult<()> {
        let strategy = self
            .available_adapters
            .get(name)
            .cloned()
            .ok_or_else(|| KnowledgeError::AdapterNotFound {
                name: name.to_string(),
            })?;

        debug!("Enabling adapter '{}'", name);
        self.enabled_adapters.insert(name.to_string(), strategy);

        if let Some(variables) = variables {
            self.set_adapter_variables(name, variables)?;
        }
        Ok(())
    }

    /// Disables an adapter. Disabling an unknown or disabled adapter does nothing.
    pub fn disable_adapter(&mut self, name: &str) {
        if self.enabled_adapters.remove(name).is_some() {
            debug!("Disabled adapter '{}'", name);
        }
    }

    /// Disables then forgets an adapter.
    pub fn unregister_adapter(&mut self, name: &str) {
        self.disable_adapter(name);
        if self.available_adapters.remove(name).is_some() {
            debug!("Unregistered adapter '{}'", name);
        }
    }

    /// Registers one of the default adapters by any of its names.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::RegisterError`] when `name` is not a default adapter.
    pub fn use_adapter(&mut self, name: &str, enable: bool) -> KnowledgeResult<()> {
        let default = find_default_adapter(name)?;
        self.register_adapter(
            default.registered_name(),
            default.strategy().clone(),
            enable,
            None,
        )
    }

    /// Sets the variables of one adapter.
    ///
    /// A map is stored as is, or only its `name` branch when it has one. A
    /// path is read as YAML and handled like a map.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::LearnError`] when the file cannot be read or parsed.
    pub fn set_adapter_variables(
        &mut self,
        name: &str,
        variables: impl Into<VariablesSource>,
    ) -> KnowledgeResult<()> {
        match variables.into() {
            VariablesSource::Map(map) => {
                let map = match map.get(name).and_then(as_variable_map) {
                    Some(branch) => branch,
                    None => map,
                };

                debug!("Setting {} variables for adapter '{}'", map.len(), name);
                self.variables
                    .insert(name.to_string(), Value::Object(map.into_iter().collect()));
                Ok(())
            }
            VariablesSource::Path(path) => {
                let map = read_map_file(&path, FileFormat::Yaml)
                    .map_err(|e| KnowledgeError::learn(e.to_string()))?;
                self.set_adapter_variables(name, map)
            }
        }
    }

    /// Sets the variables shared by every adapter.
    ///
    /// A path is read as YAML, then narrowed to the branch of the current
    /// environment when there is one.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::LearnError`] when the file cannot be read or parsed.
    pub fn set_variables(&mut self, variables: impl Into<VariablesSource>) -> KnowledgeResult<()> {
        self.variables = match variables.into() {
            VariablesSource::Map(map) => map,
            VariablesSource::Path(path) => {
                debug!("Fetching variables config from {:?}", path);
                let descriptor = read_map_file(&path, FileFormat::Yaml)
                    .map_err(|e| KnowledgeError::learn(e.to_string()))?;
                scope(&descriptor, self.config.environment())
            }
        };
        Ok(())
    }
}

impl Default for Learner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Learner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Learner")
            .field("config", &self.config)
            .field("additional_params", &self.additional_params)
            .field("available_adapters", &self.available_adapters)
            .field("enabled_adapters", &self.enabled_adapters)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}
