//! Variable maps, variable descriptors and the file reader behind them.
//!
//! A descriptor maps project-facing variable names to literal values, to
//! source-specific keys (an environment variable name for instance) or, at the
//! top level only, to per-environment branches. Descriptors coming from files are
//! always read and parsed before being stored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{KnowledgeError, KnowledgeResult};

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;

/// A flat keyed map of variable name to value.
pub type VariableMap = BTreeMap<String, Value>;

/// Supported structured file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Picks a format from the file extension. Anything that is not `.json`
    /// is read as YAML, which is also a superset of JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Either an in-memory descriptor or the path of a YAML file holding one.
#[derive(Debug, Clone, PartialEq)]
pub enum VariablesSource {
    Map(VariableMap),
    Path(PathBuf),
}

impl From<VariableMap> for VariablesSource {
    fn from(map: VariableMap) -> Self {
        VariablesSource::Map(map)
    }
}

impl From<&str> for VariablesSource {
    fn from(path: &str) -> Self {
        VariablesSource::Path(PathBuf::from(path))
    }
}

impl From<String> for VariablesSource {
    fn from(path: String) -> Self {
        VariablesSource::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for VariablesSource {
    fn from(path: PathBuf) -> Self {
        VariablesSource::Path(path)
    }
}

impl From<&Path> for VariablesSource {
    fn from(path: &Path) -> Self {
        VariablesSource::Path(path.to_path_buf())
    }
}

impl TryFrom<Value> for VariablesSource {
    type Error = KnowledgeError;

    fn try_from(value: Value) -> KnowledgeResult<Self> {
        match value {
            Value::Object(map) => Ok(VariablesSource::Map(map.into_iter().collect())),
            Value::String(path) => Ok(VariablesSource::Path(PathBuf::from(path))),
            other => Err(KnowledgeError::learn(format!(
                "Unable to understand following path or descriptor: {}",
                other
            ))),
        }
    }
}

/// Reads a boolean parameter; `"true"`, `"yes"` and `"1"` count as true.
pub fn param_flag(params: &VariableMap, name: &str) -> bool {
    match params.get(name) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => {
            matches!(text.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        Some(Value::Number(number)) => number.as_i64() == Some(1),
        _ => false,
    }
}

/// Converts a JSON object into a [`VariableMap`], or `None` for any other value.
pub fn as_variable_map(value: &Value) -> Option<VariableMap> {
    value
        .as_object()
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

/// Reads and parses a structured file into a value.
pub fn read_file(path: &Path, format: FileFormat) -> KnowledgeResult<Value> {
    debug!("Reading {:?} variables from {:?}", format, path);

    let content = fs::read_to_string(path).map_err(|e| KnowledgeError::FileAccessError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_str(&content, format).map_err(|reason| KnowledgeError::ParseError {
        path: path.display().to_string(),
        reason,
    })
}

/// Reads a structured file whose top level must be a map.
pub fn read_map_file(path: &Path, format: FileFormat) -> KnowledgeResult<VariableMap> {
    match read_file(path, format)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(VariableMap::new()),
        other => Err(KnowledgeError::ParseError {
            path: path.display().to_string(),
            reason: format!("expected a map at the top level, found {}", kind_of(&other)),
        }),
    }
}

fn parse_str(content: &str, format: FileFormat) -> Result<Value, String> {
    match format {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
            yaml_to_value(yaml)
        }
    }
}

/// Converts a YAML document into a JSON value, rendering non-string map keys
/// to their string form and unwrapping tagged values. Non-finite floats
/// (`.nan`, `.inf`) have no JSON form and are rejected.
pub(crate) fn yaml_to_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    let value = match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("number {} cannot be represented", n))?
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| Ok((key_to_string(key)?, yaml_to_value(value)?)))
                .collect::<Result<_, String>>()?,
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value)?,
    };
    Ok(value)
}

fn key_to_string(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Tagged(tagged) => key_to_string(tagged.value),
        other => Ok(yaml_to_value(other)?.to_string()),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}
