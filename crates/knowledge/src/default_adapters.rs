//! Process-wide table of the adapters [`Learner::use_adapter`](crate::Learner::use_adapter)
//! knows by name.
//!
//! Each entry lists the names it answers to; the first one is the name the
//! adapter is registered under in the learner.

use std::sync::{OnceLock, RwLock};

use tracing::debug;

use crate::adapters::AdapterStrategy;
use crate::errors::{KnowledgeError, KnowledgeResult};

#[cfg(test)]
#[path = "default_adapters_tests.rs"]
mod tests;

/// One recognized default adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAdapter {
    names: Vec<String>,
    strategy: AdapterStrategy,
}

impl DefaultAdapter {
    /// Name used when registering the adapter in a learner.
    pub fn registered_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn strategy(&self) -> &AdapterStrategy {
        &self.strategy
    }

    fn answers_to(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }
}

fn table() -> &'static RwLock<Vec<DefaultAdapter>> {
    static TABLE: OnceLock<RwLock<Vec<DefaultAdapter>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(builtin_entries()))
}

fn builtin_entries() -> Vec<DefaultAdapter> {
    vec![
        entry(&["default", "keyval", "key_value"], AdapterStrategy::key_value()),
        entry(&["environment", "env", "env_vars"], AdapterStrategy::environment()),
        entry(&["file", "config", "config_file"], AdapterStrategy::file()),
    ]
}

fn entry(names: &[&str], strategy: AdapterStrategy) -> DefaultAdapter {
    DefaultAdapter {
        names: names.iter().map(|name| name.to_string()).collect(),
        strategy,
    }
}

/// Makes `strategy` available to `use_adapter` under every name of `names`.
///
/// Names already known are taken over by the new entry, so the latest
/// registration wins. Registering an empty name list is refused.
pub fn register_default_adapter(names: &[&str], strategy: AdapterStrategy) -> KnowledgeResult<()> {
    if names.is_empty() {
        return Err(KnowledgeError::RegisterError {
            name: String::new(),
        });
    }

    let mut table = table().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    for existing in table.iter_mut() {
        existing.names.retain(|known| !names.contains(&known.as_str()));
    }
    table.retain(|existing| !existing.names.is_empty());

    debug!("Registering default adapter {:?} as {:?}", strategy.name(), names);
    table.push(entry(names, strategy));
    Ok(())
}

/// Looks up a default adapter by any of its names.
pub fn find_default_adapter(name: &str) -> KnowledgeResult<DefaultAdapter> {
    let table = table().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    table
        .iter()
        .find(|entry| entry.answers_to(name))
        .cloned()
        .ok_or_else(|| KnowledgeError::RegisterError {
            name: name.to_string(),
        })
}

/// Every name currently recognized, sorted.
pub fn default_adapter_names() -> Vec<String> {
    let table = table().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut names: Vec<String> = table
        .iter()
        .flat_map(|entry| entry.names.iter().cloned())
        .collect();
    names.sort();
    names
}
