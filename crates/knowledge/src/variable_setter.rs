//! Destination contract used by learner adapters.

use serde_json::Value;

use crate::errors::KnowledgeResult;

/// Receives the variables an adapter gathered, one `(name, value)` pair at a time.
///
/// Implemented by [`SettingsStore`](crate::SettingsStore) for the default
/// destination and by [`Backupper`](crate::Backupper) for backups; callers can
/// provide their own sink to a [`Learner`](crate::Learner).
pub trait VariableSetter: Send {
    /// Records `value` under `name`. Later writes to the same name win.
    fn set(&mut self, name: &str, value: Value) -> KnowledgeResult<()>;
}

impl<T: VariableSetter + ?Sized> VariableSetter for Box<T> {
    fn set(&mut self, name: &str, value: Value) -> KnowledgeResult<()> {
        (**self).set(name, value)
    }
}
