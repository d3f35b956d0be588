//! Learner adapters.
//!
//! An adapter is the stateful counterpart of a getter: the [`Learner`](crate::Learner)
//! instantiates it with its parameters and variables, then runs it against a
//! [`VariableSetter`]. Adapters are registered as [`AdapterStrategy`] values,
//! a name plus a constructor.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::resolver::Invokable;
use crate::scope::scope;
use crate::variable_setter::VariableSetter;
use crate::variables::{param_flag, VariableMap};

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;

pub mod environment;
pub mod file;
pub mod key_value;

pub use environment::EnvironmentAdapter;
pub use file::FileAdapter;
pub use key_value::KeyValueAdapter;

/// A source run by the learner.
pub trait Adapter: Invokable + Send {
    /// Sends every gathered variable to `setter`.
    fn run(&self, setter: &mut dyn VariableSetter) -> KnowledgeResult<()>;
}

/// Construction input of an adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterArgs {
    /// Extra parameters registered for the adapter.
    pub params: VariableMap,
    /// Variable descriptor of the adapter.
    pub variables: VariableMap,
    /// Environment the descriptor is scoped to.
    pub environment: Option<String>,
}

impl AdapterArgs {
    /// Descriptor scoped to the environment.
    pub fn scoped_variables(&self) -> VariableMap {
        scope(&self.variables, self.environment.as_deref())
    }

    /// Reads a boolean parameter, see [`param_flag`].
    pub fn flag(&self, name: &str) -> bool {
        param_flag(&self.params, name)
    }

    /// Reads a string parameter.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }
}

/// Builds an adapter from its arguments.
pub type AdapterFactory =
    Arc<dyn Fn(AdapterArgs) -> KnowledgeResult<Box<dyn Adapter>> + Send + Sync>;

/// A named adapter implementation.
#[derive(Clone)]
pub struct AdapterStrategy {
    name: String,
    factory: AdapterFactory,
}

impl AdapterStrategy {
    /// Creates a strategy from a typed constructor.
    pub fn new<A, F>(name: impl Into<String>, constructor: F) -> Self
    where
        A: Adapter + 'static,
        F: Fn(AdapterArgs) -> KnowledgeResult<A> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(move |args| Ok(Box::new(constructor(args)?) as Box<dyn Adapter>)),
        }
    }

    /// Creates a strategy from an already type-erased factory.
    pub fn from_factory(name: impl Into<String>, factory: AdapterFactory) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    pub fn key_value() -> Self {
        Self::new("KeyValue", |args: AdapterArgs| Ok(KeyValueAdapter::new(&args)))
    }

    pub fn environment() -> Self {
        Self::new("Environment", |args: AdapterArgs| {
            Ok(EnvironmentAdapter::new(&args))
        })
    }

    pub fn file() -> Self {
        Self::new("File", |args: AdapterArgs| Ok(FileAdapter::new(&args)))
    }

    /// Name of the implementation.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instantiate(&self, args: AdapterArgs) -> KnowledgeResult<Box<dyn Adapter>> {
        (self.factory)(args)
    }
}

impl PartialEq for AdapterStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for AdapterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Abstract base of the adapters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseAdapter;

impl Invokable for BaseAdapter {
    fn is_invokable(&self) -> bool {
        false
    }
}

impl Adapter for BaseAdapter {
    fn run(&self, _setter: &mut dyn VariableSetter) -> KnowledgeResult<()> {
        Err(KnowledgeError::NotImplemented {
            strategy: "Adapters::Base".to_string(),
        })
    }
}

/// Sends every entry of `variables` to `setter`.
pub(crate) fn apply_all(
    variables: &VariableMap,
    setter: &mut dyn VariableSetter,
) -> KnowledgeResult<()> {
    for (name, value) in variables {
        setter.set(name, value.clone())?;
    }
    Ok(())
}
