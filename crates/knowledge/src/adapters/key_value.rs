use crate::adapters::{apply_all, Adapter, AdapterArgs};
use crate::errors::KnowledgeResult;
use crate::resolver::Invokable;
use crate::variable_setter::VariableSetter;
use crate::variables::VariableMap;

/// Applies its descriptor as literal values.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueAdapter {
    variables: VariableMap,
}

impl KeyValueAdapter {
    pub fn new(args: &AdapterArgs) -> Self {
        Self {
            variables: args.scoped_variables(),
        }
    }
}

impl Invokable for KeyValueAdapter {}

impl Adapter for KeyValueAdapter {
    fn run(&self, setter: &mut dyn VariableSetter) -> KnowledgeResult<()> {
        apply_all(&self.variables, setter)
    }
}
