//! Backup sink.
//!
//! Collects the variables a learner gathers instead of applying them, then
//! writes them to a YAML file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::errors::KnowledgeResult;
use crate::exporters::{persist, to_yaml};
use crate::variable_setter::VariableSetter;
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "backupper_tests.rs"]
mod tests;

/// Accumulates `(name, value)` pairs for later serialization.
///
/// # Examples
///
/// ```no_run
/// use knowledge::Backupper;
/// use serde_json::json;
///
/// let mut backupper = Backupper::new("config/backup.yml");
/// backupper.register("foo", json!("bar"));
/// backupper.backup()?;
/// # Ok::<(), knowledge::KnowledgeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Backupper {
    configuration: VariableMap,
    path: PathBuf,
}

impl Backupper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            configuration: VariableMap::new(),
            path: path.into(),
        }
    }

    /// Records a variable. Later writes to the same name win.
    pub fn register(&mut self, name: impl Into<String>, value: Value) {
        self.configuration.insert(name.into(), value);
    }

    pub fn configuration(&self) -> &VariableMap {
        &self.configuration
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the collected variables as YAML, overwriting the file.
    pub fn backup(&self) -> KnowledgeResult<()> {
        let yaml = to_yaml(&self.configuration)?;
        persist(Some(&self.path), &yaml)?;

        info!(
            "Backed up {} variables to {:?}",
            self.configuration.len(),
            self.path
        );
        Ok(())
    }
}

impl VariableSetter for Backupper {
    fn set(&mut self, name: &str, value: Value) -> KnowledgeResult<()> {
        self.register(name, value);
        Ok(())
    }
}
