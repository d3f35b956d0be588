//! Environment scoping of variable descriptors.
//!
//! A descriptor may group its variables per deployment environment:
//!
//! ```yaml
//! staging:
//!   key: s
//! production:
//!   key: p
//! ```
//!
//! Scoping to `production` selects `{key: p}`. Only the top level is inspected;
//! descriptors without a matching branch are returned unchanged.

use serde_json::Value;
use tracing::{debug, warn};

use crate::variables::VariableMap;

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;

/// Returns the branch of `descriptor` matching `environment`, or the descriptor
/// itself when there is no environment or no matching map branch.
///
/// # Examples
///
/// ```
/// use knowledge::{scope, VariableMap};
/// use serde_json::json;
///
/// let descriptor: VariableMap = serde_json::from_value(json!({
///     "staging": {"key": "s"},
///     "production": {"key": "p"},
/// })).unwrap();
///
/// let scoped = scope(&descriptor, Some("production"));
/// assert_eq!(scoped.get("key"), Some(&json!("p")));
///
/// let untouched = scope(&descriptor, Some("test"));
/// assert_eq!(untouched, descriptor);
/// ```
pub fn scope(descriptor: &VariableMap, environment: Option<&str>) -> VariableMap {
    let Some(environment) = environment else {
        return descriptor.clone();
    };

    match descriptor.get(environment) {
        Some(Value::Object(branch)) => {
            debug!("Scoping variables to environment '{}'", environment);
            branch.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        }
        Some(Value::Null) | None => descriptor.clone(),
        Some(other) => {
            warn!(
                "Environment branch '{}' is not a map ({}), keeping the whole descriptor",
                environment,
                crate::variables::kind_of(other)
            );
            descriptor.clone()
        }
    }
}

/// Same as [`scope`] for an arbitrary value: non-map values are returned as-is.
pub fn scope_value(descriptor: &Value, environment: Option<&str>) -> Value {
    match descriptor {
        Value::Object(map) => {
            let map: VariableMap = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            Value::Object(scope(&map, environment).into_iter().collect())
        }
        other => other.clone(),
    }
}
