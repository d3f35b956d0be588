//! Strategy resolution by name.
//!
//! Sources, destinations and exporters are looked up by name in a
//! [`StrategyRegistry`] populated at start-up and extended through explicit
//! registration calls. Names are normalized first, so `key_value`, `KeyValue`
//! and `Key-Value` all designate the same strategy.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{KnowledgeError, KnowledgeResult, StrategyNamespace};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Normalizes a strategy name: splits on `_` and `-`, upper-cases the first
/// letter of each segment and concatenates them.
///
/// # Examples
///
/// ```
/// use knowledge::normalize_name;
///
/// assert_eq!(normalize_name("key_value"), "KeyValue");
/// assert_eq!(normalize_name("Key-Value"), "KeyValue");
/// assert_eq!(normalize_name("json"), "Json");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.split(['_', '-'])
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn lookup_key(name: &str) -> String {
    normalize_name(name.trim()).to_lowercase()
}

/// Capability shared by every strategy instance: it exposes an entry point that
/// can be invoked by the orchestrators.
///
/// Concrete strategies keep the default. Abstract bases answer `false`, which
/// makes orchestration fail with [`KnowledgeError::NotCallable`] instead of
/// reaching their unimplemented entry point.
pub trait Invokable {
    fn is_invokable(&self) -> bool {
        true
    }
}

/// Verifies that a freshly built strategy instance can be invoked.
pub fn ensure_invokable<T: Invokable + ?Sized>(
    namespace: StrategyNamespace,
    name: &str,
    instance: Box<T>,
) -> KnowledgeResult<Box<T>> {
    if instance.is_invokable() {
        Ok(instance)
    } else {
        Err(KnowledgeError::NotCallable {
            namespace,
            name: name.to_string(),
        })
    }
}

#[derive(Clone)]
enum Entry<F> {
    Constructible(F),
    Abstract,
}

#[derive(Clone)]
struct Registration<F> {
    name: String,
    entry: Entry<F>,
}

/// A strategy located by name.
pub struct ResolvedStrategy<'a, F> {
    /// Normalized name the strategy was registered under.
    pub name: &'a str,
    pub factory: &'a F,
}

/// Registry of named strategy factories for one namespace.
#[derive(Clone)]
pub struct StrategyRegistry<F> {
    namespace: StrategyNamespace,
    entries: HashMap<String, Registration<F>>,
}

impl<F> StrategyRegistry<F> {
    /// Creates an empty registry for `namespace`.
    pub fn new(namespace: StrategyNamespace) -> Self {
        Self {
            namespace,
            entries: HashMap::new(),
        }
    }

    pub fn namespace(&self) -> StrategyNamespace {
        self.namespace
    }

    /// Registers `factory` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: &str, factory: F) -> &mut Self {
        self.insert(name, Entry::Constructible(factory))
    }

    /// Registers a name that exists in the namespace but cannot be built.
    pub fn register_abstract(&mut self, name: &str) -> &mut Self {
        self.insert(name, Entry::Abstract)
    }

    fn insert(&mut self, name: &str, entry: Entry<F>) -> &mut Self {
        let normalized = normalize_name(name.trim());
        debug!("Registering {}::{}", self.namespace, normalized);
        self.entries.insert(
            normalized.to_lowercase(),
            Registration {
                name: normalized,
                entry,
            },
        );
        self
    }

    /// Removes the strategy registered under `name`, if any.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.entries.remove(&lookup_key(name)).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&lookup_key(name))
    }

    /// Normalized names of every registration, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolves `name` to a constructible strategy.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::UnknownStrategy`] tagged with this registry's
    /// namespace when the name is unknown or designates an abstract strategy.
    pub fn resolve(&self, name: &str) -> KnowledgeResult<ResolvedStrategy<'_, F>> {
        let normalized = normalize_name(name.trim());
        let unknown = || KnowledgeError::unknown(self.namespace, normalized.clone());

        let registration = self
            .entries
            .get(&normalized.to_lowercase())
            .ok_or_else(unknown)?;

        match &registration.entry {
            Entry::Constructible(factory) => {
                debug!("Resolved {}::{}", self.namespace, registration.name);
                Ok(ResolvedStrategy {
                    name: &registration.name,
                    factory,
                })
            }
            Entry::Abstract => Err(unknown()),
        }
    }
}

impl<F> std::fmt::Debug for StrategyRegistry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("namespace", &self.namespace)
            .field("names", &self.names())
            .finish()
    }
}
