use clap::Args;
use knowledge::{Knowledge, KnowledgeConfig};
use tracing::{debug, info, instrument};

use crate::commands::{parse_params, parse_variables};
use crate::errors::Error;

#[cfg(test)]
#[path = "learn_cmd_tests.rs"]
mod tests;

/// Arguments of the `learn` command
#[derive(Args, Debug, Clone)]
pub struct LearnArgs {
    /// Source strategy (hash, key_value, env, json, yaml, ...)
    pub source: String,

    /// Variables: inline JSON or a file path for file sources
    #[arg(short, long, default_value = "{}")]
    pub variables: String,

    /// Source options as inline JSON, e.g. {"raise_on_value_not_found": true}
    #[arg(short, long, default_value = "{}")]
    pub params: String,

    /// Destination strategy
    #[arg(short, long, default_value = "default")]
    pub destination: String,

    /// Deployment environment used to scope the variables
    #[arg(short, long)]
    pub environment: Option<String>,
}

impl LearnArgs {
    pub fn knowledge_config(&self) -> KnowledgeConfig {
        match &self.environment {
            Some(environment) => KnowledgeConfig::default().with_environment(environment.clone()),
            None => KnowledgeConfig::default(),
        }
    }
}

/// Learns from one source into the destination, then renders the settings
/// store as YAML.
#[instrument]
pub fn execute(args: &LearnArgs, knowledge: &Knowledge) -> Result<String, Error> {
    let variables = parse_variables(&args.variables);
    let params = parse_params(&args.params)?;
    debug!(message = "Learning", source = %args.source, destination = %args.destination);

    let learned =
        knowledge.learn_from_with_params(&args.source, variables, params, &args.destination)?;
    info!(message = "Learned variables", count = learned.len());

    let exported = knowledge.export_in("yaml", None)?;
    Ok(exported.as_text().unwrap_or_default().to_string())
}
