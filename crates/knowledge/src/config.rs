//! Runtime configuration shared by every knowledge component.
//!
//! The active deployment environment is carried explicitly in [`KnowledgeConfig`]
//! and handed to the learner and to each source strategy, instead of being read
//! from ambient process state.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment used when nothing else is configured.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration for the knowledge pipeline.
///
/// # Examples
///
/// ```
/// use knowledge::KnowledgeConfig;
///
/// let config = KnowledgeConfig::default();
/// assert_eq!(config.environment(), Some("development"));
///
/// let config = KnowledgeConfig::default().with_environment("production");
/// assert_eq!(config.environment(), Some("production"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Current deployment environment, used to select environment-scoped
    /// branches of variable descriptors. `None` disables scoping.
    #[serde(default = "default_environment")]
    pub environment: Option<String>,
}

fn default_environment() -> Option<String> {
    Some(DEFAULT_ENVIRONMENT.to_string())
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

impl KnowledgeConfig {
    /// Creates a configuration for the given environment.
    pub fn new(environment: Option<String>) -> Self {
        Self { environment }
    }

    /// Returns a copy of this configuration bound to `environment`.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Returns a copy of this configuration without any environment.
    pub fn without_environment(mut self) -> Self {
        self.environment = None;
        self
    }

    /// The active environment, if any.
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}
