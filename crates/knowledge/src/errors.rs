//! Knowledge error types.
//!
//! Every failure raised while resolving strategies, scoping descriptors, gathering
//! variables or exporting them is a [`KnowledgeError`], so callers can match one
//! variant precisely or handle the whole family at once.

use std::fmt;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// The strategy family a name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyNamespace {
    /// Source strategies producing a flat variable map.
    Getter,
    /// Destination strategies consuming a flat variable map.
    Setter,
    /// Output formats for a flat variable map.
    Exporter,
    /// Learner adapters.
    Adapter,
}

impl StrategyNamespace {
    /// Human readable role of the namespace.
    pub fn role(&self) -> &'static str {
        match self {
            StrategyNamespace::Getter => "source",
            StrategyNamespace::Setter => "destination",
            StrategyNamespace::Exporter => "exporter",
            StrategyNamespace::Adapter => "adapter",
        }
    }
}

impl fmt::Display for StrategyNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyNamespace::Getter => "Getters",
            StrategyNamespace::Setter => "Setters",
            StrategyNamespace::Exporter => "Exporters",
            StrategyNamespace::Adapter => "Adapters",
        };
        f.write_str(name)
    }
}

/// Errors raised by the knowledge pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnowledgeError {
    #[error("Unknown {} strategy: cannot find {namespace}::{name}", namespace.role())]
    UnknownStrategy {
        namespace: StrategyNamespace,
        name: String,
    },

    #[error("Strategy {namespace}::{name} is not callable")]
    NotCallable {
        namespace: StrategyNamespace,
        name: String,
    },

    #[error("{strategy} is not meant to be used directly, its entry point must be provided by a concrete strategy")]
    NotImplemented { strategy: String },

    #[error("Cannot find \"{name}\" in available adapters")]
    AdapterNotFound { name: String },

    #[error("Unable to register following: {name}")]
    RegisterError { name: String },

    #[error("Unable to learn variables: {reason}")]
    LearnError { reason: String },

    #[error("Environment variable {env_var} not found for {variable}")]
    ValueNotFound { variable: String, env_var: String },

    #[error("Environment variable {env_var} for {variable} is not valid unicode")]
    ValueNotUnicode { variable: String, env_var: String },

    #[error("Failed to access file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("Failed to serialize data as {format}: {reason}")]
    SerializationError { format: String, reason: String },
}

impl KnowledgeError {
    pub(crate) fn unknown(namespace: StrategyNamespace, name: impl Into<String>) -> Self {
        KnowledgeError::UnknownStrategy {
            namespace,
            name: name.into(),
        }
    }

    pub(crate) fn learn(reason: impl Into<String>) -> Self {
        KnowledgeError::LearnError {
            reason: reason.into(),
        }
    }

    /// Returns `true` when the error reports an unresolvable name in `namespace`.
    pub fn is_unknown_in(&self, namespace: StrategyNamespace) -> bool {
        matches!(self, KnowledgeError::UnknownStrategy { namespace: ns, .. } if *ns == namespace)
    }
}

/// Result type alias for knowledge operations.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
