//! Configuration file of the knowledge CLI.
//!
//! The `gather` and `backup` commands build a [`Learner`] from a TOML file
//! describing the environment, the variables and the adapters to run. The
//! file is looked up in the current directory unless a path is given.

use std::{
    fs,
    path::{Path, PathBuf},
};

use knowledge::default_adapters::find_default_adapter;
use knowledge::{KnowledgeConfig, Learner, VariableMap, VariablesSource, DEFAULT_ENVIRONMENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "knowledge.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the knowledge CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// environment = "production"
/// variables = "config/variables.yml"
/// backup = "config/backup.yml"
///
/// [[adapters]]
/// name = "env"
///
/// [adapters.variables]
/// database_url = "DATABASE_URL"
/// pool_size = ["POOL_SIZE", 5]
///
/// [adapters.params]
/// raise_on_value_not_found = true
///
/// [[adapters]]
/// name = "default"
/// enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment variables are scoped to.
    #[serde(default = "AppConfig::default_environment")]
    pub environment: String,

    /// Variables shared by every adapter: a YAML file path or an inline table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    /// Where `backup` writes when no output path is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,

    /// Adapters to register, by default adapter name.
    #[serde(default)]
    pub adapters: Vec<AdapterConfig>,
}

impl AppConfig {
    fn default_environment() -> String {
        DEFAULT_ENVIRONMENT.to_string()
    }

    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file does not exist, cannot be read
    /// or is not valid TOML for this structure.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Saves the configuration to a TOML file, creating parent directories
    /// and overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    pub fn knowledge_config(&self) -> KnowledgeConfig {
        KnowledgeConfig::default().with_environment(self.environment.clone())
    }

    /// Builds a learner with every configured adapter registered, its
    /// parameters and variables set.
    ///
    /// Shared variables are set first so that adapter-specific variables are
    /// kept alongside them.
    pub fn learner(&self) -> Result<Learner, Error> {
        let mut learner = Learner::with_config(self.knowledge_config());

        if let Some(variables) = &self.variables {
            learner.set_variables(VariablesSource::try_from(variables.clone())?)?;
        }

        for adapter in &self.adapters {
            let registered = find_default_adapter(&adapter.name)?
                .registered_name()
                .to_string();
            learner.use_adapter(&adapter.name, adapter.enabled)?;

            if let Some(params) = &adapter.params {
                learner.add_adapter_params(&registered, params.clone());
            }
            if let Some(variables) = &adapter.variables {
                learner.set_adapter_variables(
                    &registered,
                    VariablesSource::try_from(variables.clone())?,
                )?;
            }
        }

        debug!(
            "Built learner with {} adapters ({} enabled)",
            learner.available_adapters().len(),
            learner.enabled_adapters().len()
        );
        Ok(learner)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Self::default_environment(),
            variables: None,
            backup: None,
            adapters: vec![AdapterConfig::new("default")],
        }
    }
}

/// One adapter entry of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Any name understood by the default adapter table (`env`, `file`, ...).
    pub name: String,

    #[serde(default = "AdapterConfig::default_enabled")]
    pub enabled: bool,

    /// Variables of this adapter: a YAML file path or an inline table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    /// Extra parameters handed to the adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<VariableMap>,
}

impl AdapterConfig {
    fn default_enabled() -> bool {
        true
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: Self::default_enabled(),
            variables: None,
            params: None,
        }
    }
}

/// Resolves the path to the configuration file, defaulting to
/// `./knowledge.toml` in the current directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
