//! Export formats.
//!
//! An exporter turns a flat variable map into an output format and, when it
//! was given a destination, writes the result there (overwriting the file).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::errors::{KnowledgeError, KnowledgeResult, StrategyNamespace};
use crate::resolver::{Invokable, StrategyRegistry};
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "exporters_tests.rs"]
mod tests;

/// Result of an export.
#[derive(Debug, Clone, PartialEq)]
pub enum Exported {
    /// In-memory map, for the pass-through format.
    Map(VariableMap),
    /// Serialized text.
    Text(String),
}

impl Exported {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Exported::Text(text) => Some(text),
            Exported::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&VariableMap> {
        match self {
            Exported::Map(map) => Some(map),
            Exported::Text(_) => None,
        }
    }
}

/// An export format.
pub trait Exporter: Invokable + Send {
    fn call(&self) -> KnowledgeResult<Exported>;
}

/// Construction input of an exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExporterArgs {
    pub data: VariableMap,
    pub destination: Option<PathBuf>,
}

/// Builds an exporter from its arguments.
pub type ExporterFactory = Arc<dyn Fn(ExporterArgs) -> Box<dyn Exporter> + Send + Sync>;

/// Wraps a typed constructor into an [`ExporterFactory`].
pub fn exporter_factory<E, F>(constructor: F) -> ExporterFactory
where
    E: Exporter + 'static,
    F: Fn(ExporterArgs) -> E + Send + Sync + 'static,
{
    Arc::new(move |args| Box::new(constructor(args)) as Box<dyn Exporter>)
}

/// Registry of the exporters shipped with the crate: `hash`, `json`, `yaml`
/// and the non-invokable `base`.
pub fn builtin_exporters() -> StrategyRegistry<ExporterFactory> {
    let mut registry = StrategyRegistry::new(StrategyNamespace::Exporter);

    registry
        .register("hash", exporter_factory(|args: ExporterArgs| HashExporter::new(args.data)))
        .register(
            "json",
            exporter_factory(|args: ExporterArgs| JsonExporter::new(args.data, args.destination)),
        )
        .register(
            "yaml",
            exporter_factory(|args: ExporterArgs| YamlExporter::new(args.data, args.destination)),
        )
        .register("base", exporter_factory(|_| BaseExporter));

    registry
}

/// Pass-through format: returns the map itself.
#[derive(Debug, Clone, PartialEq)]
pub struct HashExporter {
    data: VariableMap,
}

impl HashExporter {
    pub fn new(data: VariableMap) -> Self {
        Self { data }
    }
}

impl Invokable for HashExporter {}

impl Exporter for HashExporter {
    fn call(&self) -> KnowledgeResult<Exported> {
        Ok(Exported::Map(self.data.clone()))
    }
}

/// Compact JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonExporter {
    data: VariableMap,
    destination: Option<PathBuf>,
}

impl JsonExporter {
    pub fn new(data: VariableMap, destination: Option<PathBuf>) -> Self {
        Self { data, destination }
    }
}

impl Invokable for JsonExporter {}

impl Exporter for JsonExporter {
    fn call(&self) -> KnowledgeResult<Exported> {
        let text = serde_json::to_string(&self.data).map_err(|e| {
            KnowledgeError::SerializationError {
                format: "JSON".to_string(),
                reason: e.to_string(),
            }
        })?;

        persist(self.destination.as_deref(), &text)?;
        Ok(Exported::Text(text))
    }
}

/// YAML text.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlExporter {
    data: VariableMap,
    destination: Option<PathBuf>,
}

impl YamlExporter {
    pub fn new(data: VariableMap, destination: Option<PathBuf>) -> Self {
        Self { data, destination }
    }
}

impl Invokable for YamlExporter {}

impl Exporter for YamlExporter {
    fn call(&self) -> KnowledgeResult<Exported> {
        let text = to_yaml(&self.data)?;
        persist(self.destination.as_deref(), &text)?;
        Ok(Exported::Text(text))
    }
}

/// Abstract base of the export formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseExporter;

impl Invokable for BaseExporter {
    fn is_invokable(&self) -> bool {
        false
    }
}

impl Exporter for BaseExporter {
    fn call(&self) -> KnowledgeResult<Exported> {
        Err(KnowledgeError::NotImplemented {
            strategy: "Exporters::Base".to_string(),
        })
    }
}

pub(crate) fn to_yaml<T: Serialize>(data: &T) -> KnowledgeResult<String> {
    serde_yaml::to_string(data).map_err(|e| KnowledgeError::SerializationError {
        format: "YAML".to_string(),
        reason: e.to_string(),
    })
}

/// Writes `text` to `destination`, replacing any previous content.
pub(crate) fn persist(destination: Option<&Path>, text: &str) -> KnowledgeResult<()> {
    let Some(path) = destination else {
        return Ok(());
    };

    fs::write(path, text).map_err(|e| KnowledgeError::FileAccessError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    info!("Exported {} bytes to {:?}", text.len(), path);
    Ok(())
}
