//! Public entry points for one-shot learning and exporting.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::config::KnowledgeConfig;
use crate::errors::KnowledgeResult;
use crate::export::ExportOperation;
use crate::exporters::{builtin_exporters, Exported, ExporterFactory};
use crate::getters::{builtin_getters, GetterFactory};
use crate::operation::SingleOperation;
use crate::resolver::StrategyRegistry;
use crate::setters::{builtin_setters, SetterFactory};
use crate::settings_store::SettingsStore;
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "use_cases_tests.rs"]
mod tests;

/// Facade over the strategy registries, a settings store and the active
/// configuration.
///
/// # Examples
///
/// ```
/// use knowledge::{Knowledge, KnowledgeConfig, SettingsStore};
/// use serde_json::json;
///
/// let knowledge = Knowledge::with_store(KnowledgeConfig::default(), SettingsStore::new());
/// knowledge.learn_from("hash", json!({"foo": "bar"}), "default")?;
///
/// assert_eq!(knowledge.store().get("foo"), Some(json!("bar")));
///
/// let json = knowledge.export_in("json", None)?;
/// assert_eq!(json.as_text(), Some(r#"{"foo":"bar"}"#));
/// # Ok::<(), knowledge::KnowledgeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Knowledge {
    config: KnowledgeConfig,
    store: SettingsStore,
    getters: Arc<StrategyRegistry<GetterFactory>>,
    setters: Arc<StrategyRegistry<SetterFactory>>,
    exporters: Arc<StrategyRegistry<ExporterFactory>>,
}

impl Knowledge {
    /// Default configuration, global settings store.
    pub fn new() -> Self {
        Self::with_config(KnowledgeConfig::default())
    }

    pub fn with_config(config: KnowledgeConfig) -> Self {
        Self::with_store(config, SettingsStore::global())
    }

    pub fn with_store(config: KnowledgeConfig, store: SettingsStore) -> Self {
        Self {
            config,
            store,
            getters: Arc::new(builtin_getters()),
            setters: Arc::new(builtin_setters()),
            exporters: Arc::new(builtin_exporters()),
        }
    }

    pub fn config(&self) -> &KnowledgeConfig {
        &self.config
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn getters(&self) -> &StrategyRegistry<GetterFactory> {
        &self.getters
    }

    pub fn setters(&self) -> &StrategyRegistry<SetterFactory> {
        &self.setters
    }

    pub fn exporters(&self) -> &StrategyRegistry<ExporterFactory> {
        &self.exporters
    }

    /// Adds a source strategy, or replaces the one registered under `name`.
    pub fn register_getter(&mut self, name: &str, factory: GetterFactory) -> &mut Self {
        Arc::make_mut(&mut self.getters).register(name, factory);
        self
    }

    /// Adds a destination strategy, or replaces the one registered under `name`.
    pub fn register_setter(&mut self, name: &str, factory: SetterFactory) -> &mut Self {
        Arc::make_mut(&mut self.setters).register(name, factory);
        self
    }

    /// Adds an export format, or replaces the one registered under `name`.
    pub fn register_exporter(&mut self, name: &str, factory: ExporterFactory) -> &mut Self {
        Arc::make_mut(&mut self.exporters).register(name, factory);
        self
    }

    fn operation(&self) -> SingleOperation {
        SingleOperation::new(
            Arc::clone(&self.getters),
            Arc::clone(&self.setters),
            self.config.clone(),
            self.store.clone(),
        )
    }

    /// Learns `variables` from `source` and applies them to `destination`.
    #[instrument(skip(self, variables))]
    pub fn learn_from(
        &self,
        source: &str,
        variables: Value,
        destination: &str,
    ) -> KnowledgeResult<VariableMap> {
        self.operation().run(source, variables, destination)
    }

    /// Same as [`learn_from`](Self::learn_from), with options for the source
    /// (for instance `raise_on_value_not_found` for `env`).
    #[instrument(skip(self, variables, params))]
    pub fn learn_from_with_params(
        &self,
        source: &str,
        variables: Value,
        params: VariableMap,
        destination: &str,
    ) -> KnowledgeResult<VariableMap> {
        self.operation()
            .run_with_params(source, variables, params, destination)
    }

    /// Learns `variables` from `source` without applying them; the format is
    /// chosen afterwards with [`ExportOperation::retarget`].
    ///
    /// ```
    /// use knowledge::{Knowledge, KnowledgeConfig, SettingsStore};
    /// use serde_json::json;
    ///
    /// let knowledge = Knowledge::with_store(KnowledgeConfig::default(), SettingsStore::new());
    /// let mut export = knowledge.export_learnings_from("hash", json!({"foo": "bar"}))?;
    ///
    /// let yaml = export.retarget("yaml", None)?;
    /// assert_eq!(yaml.as_text(), Some("foo: bar\n"));
    /// # Ok::<(), knowledge::KnowledgeError>(())
    /// ```
    pub fn export_learnings_from(
        &self,
        source: &str,
        variables: Value,
    ) -> KnowledgeResult<ExportOperation> {
        self.export_learnings_from_with_params(source, variables, VariableMap::new())
    }

    /// Same as [`export_learnings_from`](Self::export_learnings_from), with
    /// options for the source.
    #[instrument(skip(self, variables, params))]
    pub fn export_learnings_from_with_params(
        &self,
        source: &str,
        variables: Value,
        params: VariableMap,
    ) -> KnowledgeResult<ExportOperation> {
        let data = self
            .operation()
            .run_with_params(source, variables, params, "exporter")?;
        Ok(ExportOperation::new(
            Arc::clone(&self.exporters),
            None,
            None,
            data,
        ))
    }

    /// Exports the current content of the settings store.
    #[instrument(skip(self))]
    pub fn export_in(
        &self,
        format: &str,
        destination: Option<PathBuf>,
    ) -> KnowledgeResult<Exported> {
        let data = self.store.snapshot();
        info!("Exporting {} settings as {}", data.len(), format);

        ExportOperation::new(Arc::clone(&self.exporters), Some(format), destination, data).call()
    }
}

impl Default for Knowledge {
    fn default() -> Self {
        Self::new()
    }
}
