//! Source strategies ("getters").
//!
//! A getter is built from a variable descriptor and, once called, produces a
//! flat map of project variable names to resolved values. Getters are looked up
//! by name through the registry returned by [`builtin_getters`]:
//!
//! | Names                 | Strategy            |
//! |-----------------------|---------------------|
//! | `hash`, `key_value`   | [`KeyValueGetter`]  |
//! | `env`, `environment`  | [`EnvGetter`]       |
//! | `json`                | [`FileGetter`] (JSON) |
//! | `yaml`                | [`FileGetter`] (YAML) |
//! | `base`                | [`BaseGetter`] (not invokable) |
//! | `file`                | abstract            |

use std::sync::Arc;

use serde_json::Value;

use crate::errors::{KnowledgeResult, StrategyNamespace};
use crate::resolver::{Invokable, StrategyRegistry};
use crate::variables::{param_flag, VariableMap};

#[cfg(test)]
#[path = "getters_tests.rs"]
mod tests;

pub mod base;
pub mod env;
pub mod file;
pub mod key_value;

pub use base::BaseGetter;
pub use env::EnvGetter;
pub use file::FileGetter;
pub use key_value::KeyValueGetter;

/// A source strategy.
pub trait Getter: Invokable + Send {
    /// Produces the flat variable map. Calling it again with the same
    /// descriptor and environment yields the same map.
    fn call(&self) -> KnowledgeResult<VariableMap>;
}

/// Construction input of a getter.
#[derive(Debug, Clone, PartialEq)]
pub struct GetterArgs {
    /// Raw descriptor: a map for in-memory sources, a path string for file sources.
    pub variables: Value,
    /// Strategy options such as `raise_on_value_not_found`.
    pub params: VariableMap,
    /// Environment used to scope the descriptor.
    pub environment: Option<String>,
}

impl GetterArgs {
    pub fn new(variables: Value, environment: Option<&str>) -> Self {
        Self {
            variables,
            params: VariableMap::new(),
            environment: environment.map(str::to_string),
        }
    }

    pub fn with_params(mut self, params: VariableMap) -> Self {
        self.params = params;
        self
    }

    /// Reads a boolean parameter, see [`param_flag`].
    pub fn flag(&self, name: &str) -> bool {
        param_flag(&self.params, name)
    }
}

/// Builds a getter from its arguments.
pub type GetterFactory =
    Arc<dyn Fn(GetterArgs) -> KnowledgeResult<Box<dyn Getter>> + Send + Sync>;

/// Wraps a typed constructor into a [`GetterFactory`].
pub fn getter_factory<G, F>(constructor: F) -> GetterFactory
where
    G: Getter + 'static,
    F: Fn(GetterArgs) -> KnowledgeResult<G> + Send + Sync + 'static,
{
    Arc::new(move |args| Ok(Box::new(constructor(args)?) as Box<dyn Getter>))
}

/// Registry of the getters shipped with the crate.
pub fn builtin_getters() -> StrategyRegistry<GetterFactory> {
    let mut registry = StrategyRegistry::new(StrategyNamespace::Getter);

    let key_value = getter_factory(KeyValueGetter::from_args);
    let env = getter_factory(EnvGetter::from_args);

    registry
        .register("hash", key_value.clone())
        .register("key_value", key_value)
        .register("env", env.clone())
        .register("environment", env)
        .register("json", getter_factory(FileGetter::json_from_args))
        .register("yaml", getter_factory(FileGetter::yaml_from_args))
        .register("base", getter_factory(|_| Ok(BaseGetter)))
        .register_abstract("file");

    registry
}
