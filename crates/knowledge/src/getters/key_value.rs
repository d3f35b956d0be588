use serde_json::Value;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::getters::{Getter, GetterArgs};
use crate::resolver::Invokable;
use crate::scope::scope;
use crate::variables::{kind_of, VariableMap};

#[cfg(test)]
#[path = "key_value_tests.rs"]
mod tests;

/// Identity source: returns its (environment scoped) descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueGetter {
    variables: VariableMap,
}

impl KeyValueGetter {
    pub fn new(variables: &VariableMap, environment: Option<&str>) -> Self {
        Self {
            variables: scope(variables, environment),
        }
    }

    /// Builds the getter from a map descriptor. `null` stands for an empty map.
    pub fn from_args(args: GetterArgs) -> KnowledgeResult<Self> {
        let variables = map_descriptor(args.variables, "key/value")?;
        Ok(Self::new(&variables, args.environment.as_deref()))
    }
}

impl Invokable for KeyValueGetter {}

impl Getter for KeyValueGetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        Ok(self.variables.clone())
    }
}

/// Extracts a map descriptor, rejecting paths and scalars.
pub(crate) fn map_descriptor(value: Value, source: &str) -> KnowledgeResult<VariableMap> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(VariableMap::new()),
        other => Err(KnowledgeError::learn(format!(
            "the {} source expects a map of variables, got {}",
            source,
            kind_of(&other)
        ))),
    }
}
