use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::getters::{Getter, GetterArgs};
use crate::resolver::Invokable;
use crate::scope::scope;
use crate::variables::{kind_of, read_map_file, FileFormat, VariableMap};

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;

/// File-backed source for JSON and YAML documents.
///
/// Unlike the in-memory sources, the descriptor is the file path; the file is
/// read and scoped to the environment each time the getter is called.
#[derive(Debug, Clone, PartialEq)]
pub struct FileGetter {
    path: PathBuf,
    format: FileFormat,
    environment: Option<String>,
}

impl FileGetter {
    pub fn new(path: impl Into<PathBuf>, format: FileFormat, environment: Option<&str>) -> Self {
        Self {
            path: path.into(),
            format,
            environment: environment.map(str::to_string),
        }
    }

    pub fn json_from_args(args: GetterArgs) -> KnowledgeResult<Self> {
        Self::from_args(args, FileFormat::Json)
    }

    pub fn yaml_from_args(args: GetterArgs) -> KnowledgeResult<Self> {
        Self::from_args(args, FileFormat::Yaml)
    }

    fn from_args(args: GetterArgs, format: FileFormat) -> KnowledgeResult<Self> {
        match args.variables {
            Value::String(path) => Ok(Self::new(path, format, args.environment.as_deref())),
            other => Err(KnowledgeError::learn(format!(
                "the {:?} source expects a file path, got {}",
                format,
                kind_of(&other)
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl Invokable for FileGetter {}

impl Getter for FileGetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        let content = read_map_file(&self.path, self.format)?;
        let variables = scope(&content, self.environment.as_deref());

        debug!(
            "Loaded {} variables from {:?}",
            variables.len(),
            self.path
        );
        Ok(variables)
    }
}
