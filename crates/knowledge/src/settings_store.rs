//! In-process settings store.
//!
//! The default destination of the pipeline: a typed `name -> value` map shared
//! through cheap handles. Writing a name that does not exist yet creates it;
//! writing an existing one replaces its value.

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::debug;

use crate::errors::KnowledgeResult;
use crate::variable_setter::VariableSetter;
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "settings_store_tests.rs"]
mod tests;

#[derive(Debug, Default)]
struct Settings {
    defaults: VariableMap,
    values: VariableMap,
}

/// Shared handle on a settings map.
///
/// Clones share the same underlying map.
///
/// # Examples
///
/// ```
/// use knowledge::SettingsStore;
/// use serde_json::json;
///
/// let store = SettingsStore::new();
/// store.define_setting("environment", json!("development"));
/// store.set("foo", json!("bar"));
///
/// assert_eq!(store.get("foo"), Some(json!("bar")));
///
/// store.reset();
/// assert_eq!(store.get("foo"), None);
/// assert_eq!(store.get("environment"), Some(json!("development")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    /// Creates an empty, independent store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store used when no other store is provided.
    pub fn global() -> SettingsStore {
        static GLOBAL: OnceLock<SettingsStore> = OnceLock::new();
        GLOBAL.get_or_init(SettingsStore::new).clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Declares a setting with a default value restored by [`reset`](Self::reset).
    pub fn define_setting(&self, name: impl Into<String>, default: Value) {
        let name = name.into();
        let mut settings = self.write();
        settings.defaults.insert(name.clone(), default.clone());
        settings.values.insert(name, default);
    }

    /// Assigns `value` to `name`, creating the setting if absent.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        debug!("Setting '{}'", name);
        self.write().values.insert(name, value);
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().values.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().values.is_empty()
    }

    /// Copy of every current setting.
    pub fn snapshot(&self) -> VariableMap {
        self.read().values.clone()
    }

    /// Restores the declared defaults and forgets every other setting.
    pub fn reset(&self) {
        let mut settings = self.write();
        settings.values = settings.defaults.clone();
    }

    /// Applies every entry of `data`.
    pub fn apply(&self, data: &VariableMap) {
        let mut settings = self.write();
        for (name, value) in data {
            settings.values.insert(name.clone(), value.clone());
        }
    }
}

impl VariableSetter for SettingsStore {
    fn set(&mut self, name: &str, value: Value) -> KnowledgeResult<()> {
        SettingsStore::set(self, name, value);
        Ok(())
    }
}
