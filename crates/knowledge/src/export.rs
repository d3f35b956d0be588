//! Export of a gathered variable map in a named format.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::errors::{KnowledgeError, KnowledgeResult, StrategyNamespace};
use crate::exporters::{Exported, ExporterArgs, ExporterFactory};
use crate::resolver::{ensure_invokable, StrategyRegistry};
use crate::variables::VariableMap;

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;

/// Data waiting to be exported, with the format and destination to use.
///
/// The format may be left unset at construction and chosen later with
/// [`retarget`](Self::retarget), once the data has been gathered.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use knowledge::exporters::builtin_exporters;
/// use knowledge::{ExportOperation, VariableMap};
/// use serde_json::json;
///
/// let data = VariableMap::from([("foo".to_string(), json!("bar"))]);
/// let mut export = ExportOperation::new(Arc::new(builtin_exporters()), None, None, data);
///
/// let exported = export.retarget("json", None)?;
/// assert_eq!(exported.as_text(), Some(r#"{"foo":"bar"}"#));
/// # Ok::<(), knowledge::KnowledgeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExportOperation {
    exporters: Arc<StrategyRegistry<ExporterFactory>>,
    format: Option<String>,
    destination: Option<PathBuf>,
    data: VariableMap,
}

impl ExportOperation {
    pub fn new(
        exporters: Arc<StrategyRegistry<ExporterFactory>>,
        format: Option<&str>,
        destination: Option<PathBuf>,
        data: VariableMap,
    ) -> Self {
        Self {
            exporters,
            format: format.map(str::to_string),
            destination,
            data,
        }
    }

    pub fn data(&self) -> &VariableMap {
        &self.data
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Runs the exporter named by the current format.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::UnknownStrategy`] when no format is set or the
    /// format is unknown; serialization and write failures otherwise.
    #[instrument(skip(self), fields(format = ?self.format, destination = ?self.destination))]
    pub fn call(&self) -> KnowledgeResult<Exported> {
        let format = self
            .format
            .as_deref()
            .ok_or_else(|| KnowledgeError::unknown(StrategyNamespace::Exporter, ""))?;

        let exporter = self.exporters.resolve(format)?;
        debug!("Exporting {} variables as {}", self.data.len(), exporter.name);

        let args = ExporterArgs {
            data: self.data.clone(),
            destination: self.destination.clone(),
        };
        let instance = ensure_invokable(
            StrategyNamespace::Exporter,
            exporter.name,
            (exporter.factory)(args),
        )?;
        instance.call()
    }

    /// Switches to another format and destination, then exports.
    pub fn retarget(
        &mut self,
        format: &str,
        destination: Option<PathBuf>,
    ) -> KnowledgeResult<Exported> {
        self.format = Some(format.to_string());
        self.destination = destination;
        self.call()
    }
}
