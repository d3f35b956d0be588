//! Pluggable configuration acquisition.
//!
//! Configuration values are gathered from named sources (in-memory maps,
//! environment variables, JSON and YAML files) and applied to a destination
//! (an in-process [`SettingsStore`], a custom [`VariableSetter`] or an export
//! format), optionally narrowed to the active deployment environment.
//!
//! Two paths are offered:
//!
//! - [`Knowledge`] runs one-shot operations: learn from one source into one
//!   destination, or export what a source produced.
//! - [`Learner`] keeps a registry of adapters and runs every enabled one with
//!   [`Learner::gather`], or collects their output into a YAML file with
//!   [`Learner::backup`].

pub mod adapters;
pub mod backupper;
pub mod config;
pub mod default_adapters;
pub mod errors;
pub mod export;
pub mod exporters;
pub mod getters;
pub mod learner;
pub mod operation;
pub mod pipeline_runner;
pub mod resolver;
pub mod scope;
pub mod setters;
pub mod settings_store;
pub mod use_cases;
pub mod variable_setter;
pub mod variables;


pub use adapters::{Adapter, AdapterArgs, AdapterStrategy};
pub use backupper::Backupper;
pub use config::{KnowledgeConfig, DEFAULT_ENVIRONMENT};
pub use default_adapters::{default_adapter_names, register_default_adapter};
pub use errors::{KnowledgeError, KnowledgeResult, StrategyNamespace};
pub use export::ExportOperation;
pub use exporters::Exported;
pub use learner::Learner;
pub use operation::SingleOperation;
pub use pipeline_runner::PipelineRunner;
pub use resolver::{ensure_invokable, normalize_name, Invokable, StrategyRegistry};
pub use scope::scope;
pub use settings_store::SettingsStore;
pub use use_cases::Knowledge;
pub use variable_setter::VariableSetter;
pub use variables::{VariableMap, VariablesSource};
