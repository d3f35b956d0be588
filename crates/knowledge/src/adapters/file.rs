use std::path::PathBuf;

use tracing::debug;

use crate::adapters::{apply_all, Adapter, AdapterArgs};
use crate::errors::KnowledgeResult;
use crate::resolver::Invokable;
use crate::scope::scope;
use crate::variable_setter::VariableSetter;
use crate::variables::{read_map_file, FileFormat, VariableMap};

/// Parameter naming a JSON or YAML file to load.
pub const PATH_PARAM: &str = "path";

/// Applies variables loaded from configuration files.
///
/// The learner already reads file descriptors handed to it, so by default this
/// adapter applies its variables as literal values. When its parameters carry
/// a `path`, that file is read and scoped to the environment first; explicit
/// variables then override the file content.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAdapter {
    variables: VariableMap,
    path: Option<PathBuf>,
    environment: Option<String>,
}

impl FileAdapter {
    pub fn new(args: &AdapterArgs) -> Self {
        Self {
            variables: args.scoped_variables(),
            path: args.string(PATH_PARAM).map(PathBuf::from),
            environment: args.environment.clone(),
        }
    }
}

impl Invokable for FileAdapter {}

impl Adapter for FileAdapter {
    fn run(&self, setter: &mut dyn VariableSetter) -> KnowledgeResult<()> {
        let mut values = match &self.path {
            Some(path) => {
                debug!("Loading file adapter variables from {:?}", path);
                let content = read_map_file(path, FileFormat::from_path(path))?;
                scope(&content, self.environment.as_deref())
            }
            None => VariableMap::new(),
        };

        values.extend(self.variables.clone());
        apply_all(&values, setter)
    }
}
