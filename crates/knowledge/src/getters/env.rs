use std::env::{self, VarError};

use serde_json::Value;
use tracing::debug;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::getters::key_value::map_descriptor;
use crate::getters::{Getter, GetterArgs};
use crate::resolver::Invokable;
use crate::scope::scope;
use crate::variables::{kind_of, VariableMap};

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

/// Reads variables from the process environment.
///
/// The descriptor maps each project variable to the name of an environment
/// variable, optionally bundled with a default value:
///
/// ```yaml
/// database_url: DATABASE_URL
/// pool_size: [POOL_SIZE, 5]
/// ```
///
/// A missing environment variable yields its bundled default (or `null`).
/// With [`raise_on_value_not_found`](Self::raise_on_value_not_found), or the
/// `raise_on_value_not_found` parameter of [`GetterArgs`], the first
/// missing variable aborts the whole source with
/// [`KnowledgeError::ValueNotFound`], whatever the bundled default.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvGetter {
    variables: VariableMap,
    raise_on_value_not_found: bool,
}

impl EnvGetter {
    pub fn new(variables: &VariableMap, environment: Option<&str>) -> Self {
        Self {
            variables: scope(variables, environment),
            raise_on_value_not_found: false,
        }
    }

    pub fn from_args(args: GetterArgs) -> KnowledgeResult<Self> {
        let raise = args.flag("raise_on_value_not_found");
        let variables = map_descriptor(args.variables, "environment")?;
        Ok(Self::new(&variables, args.environment.as_deref()).raise_on_value_not_found(raise))
    }

    /// Makes missing environment variables fatal.
    pub fn raise_on_value_not_found(mut self, raise: bool) -> Self {
        self.raise_on_value_not_found = raise;
        self
    }
}

impl Invokable for EnvGetter {}

impl Getter for EnvGetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        resolve_env_variables(&self.variables, self.raise_on_value_not_found)
    }
}

/// One descriptor entry: the environment variable to read and its fallback.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EnvEntry {
    pub env_var: String,
    pub default: Value,
}

impl EnvEntry {
    pub(crate) fn parse(variable: &str, entry: &Value) -> KnowledgeResult<Self> {
        match entry {
            Value::String(name) => Ok(Self {
                env_var: name.clone(),
                default: Value::Null,
            }),
            Value::Array(items) => match items.as_slice() {
                [Value::String(name)] => Ok(Self {
                    env_var: name.clone(),
                    default: Value::Null,
                }),
                [Value::String(name), default] => Ok(Self {
                    env_var: name.clone(),
                    default: default.clone(),
                }),
                _ => Err(invalid_entry(variable, entry)),
            },
            _ => Err(invalid_entry(variable, entry)),
        }
    }
}

fn invalid_entry(variable: &str, entry: &Value) -> KnowledgeError {
    KnowledgeError::learn(format!(
        "environment descriptor for '{}' must be a variable name or [name, default], got {}",
        variable,
        kind_of(entry)
    ))
}

/// Resolves every entry of an environment descriptor.
pub(crate) fn resolve_env_variables(
    variables: &VariableMap,
    raise_on_value_not_found: bool,
) -> KnowledgeResult<VariableMap> {
    let mut result = VariableMap::new();

    for (variable, entry) in variables {
        let entry = EnvEntry::parse(variable, entry)?;

        let value = match env::var(&entry.env_var) {
            Ok(value) => Value::String(value),
            Err(VarError::NotUnicode(_)) => {
                return Err(KnowledgeError::ValueNotUnicode {
                    variable: variable.clone(),
                    env_var: entry.env_var,
                });
            }
            Err(VarError::NotPresent) if raise_on_value_not_found => {
                return Err(KnowledgeError::ValueNotFound {
                    variable: variable.clone(),
                    env_var: entry.env_var,
                });
            }
            Err(VarError::NotPresent) => {
                debug!(
                    "Environment variable {} not set, using default for '{}'",
                    entry.env_var, variable
                );
                entry.default
            }
        };

        result.insert(variable.clone(), value);
    }

    Ok(result)
}
