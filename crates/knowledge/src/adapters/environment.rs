use tracing::debug;

use crate::adapters::{apply_all, Adapter, AdapterArgs};
use crate::errors::KnowledgeResult;
use crate::getters::env::resolve_env_variables;
use crate::resolver::Invokable;
use crate::variable_setter::VariableSetter;
use crate::variables::VariableMap;

/// Parameter making missing environment variables fatal.
pub const RAISE_ON_VALUE_NOT_FOUND: &str = "raise_on_value_not_found";

/// Applies values read from the process environment.
///
/// Uses the same descriptor format as [`EnvGetter`](crate::getters::EnvGetter).
/// Every variable is resolved before anything is applied, so a missing
/// required variable leaves the setter untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentAdapter {
    variables: VariableMap,
    raise_on_value_not_found: bool,
}

impl EnvironmentAdapter {
    pub fn new(args: &AdapterArgs) -> Self {
        Self {
            variables: args.scoped_variables(),
            raise_on_value_not_found: args.flag(RAISE_ON_VALUE_NOT_FOUND),
        }
    }
}

impl Invokable for EnvironmentAdapter {}

impl Adapter for EnvironmentAdapter {
    fn run(&self, setter: &mut dyn VariableSetter) -> KnowledgeResult<()> {
        let values = resolve_env_variables(&self.variables, self.raise_on_value_not_found)?;
        debug!("Applying {} environment variables", values.len());
        apply_all(&values, setter)
    }
}
