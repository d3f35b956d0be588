use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::getters::Getter;
use crate::resolver::Invokable;
use crate::variables::VariableMap;

/// Abstract base of the source strategies. It cannot produce variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseGetter;

impl Invokable for BaseGetter {
    fn is_invokable(&self) -> bool {
        false
    }
}

impl Getter for BaseGetter {
    fn call(&self) -> KnowledgeResult<VariableMap> {
        Err(KnowledgeError::NotImplemented {
            strategy: "Getters::Base".to_string(),
        })
    }
}
