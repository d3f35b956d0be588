use std::path::{Path, PathBuf};

use knowledge::{Knowledge, SettingsStore};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "learner_cmd_tests.rs"]
mod tests;

/// Runs every enabled adapter of the configuration into `store`, then
/// renders the store as YAML.
#[instrument(skip(store))]
pub fn gather(config_path: &Path, store: &SettingsStore) -> Result<String, Error> {
    let config = AppConfig::load(config_path)?;
    let mut learner = config.learner()?;
    learner.set_setter(Box::new(store.clone()));

    learner.gather()?;
    info!(message = "Gathered settings", count = store.len());

    let exported = Knowledge::with_store(config.knowledge_config(), store.clone())
        .export_in("yaml", None)?;
    Ok(exported.as_text().unwrap_or_default().to_string())
}

/// Runs every enabled adapter of the configuration into a YAML backup.
///
/// The output path falls back to the `backup` entry of the configuration.
#[instrument]
pub fn backup(config_path: &Path, output: Option<PathBuf>) -> Result<String, Error> {
    let config = AppConfig::load(config_path)?;
    let output = output.or_else(|| config.backup.clone()).ok_or_else(|| {
        Error::InvalidArguments(
            "no backup path given and none configured under 'backup'".to_string(),
        )
    })?;
    debug!(message = "Backing up", path = ?output);

    config.learner()?.backup(&output)?;

    info!(message = "Backup written", path = ?output);
    Ok(format!("Backup written to {:?}", output))
}
