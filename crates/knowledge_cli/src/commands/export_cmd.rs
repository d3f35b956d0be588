use std::path::PathBuf;

use clap::Args;
use knowledge::exporters::Exported;
use knowledge::{Knowledge, KnowledgeConfig};
use tracing::{debug, info, instrument};

use crate::commands::{parse_params, parse_variables};
use crate::errors::Error;

#[cfg(test)]
#[path = "export_cmd_tests.rs"]
mod tests;

/// Arguments of the `export` command
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Source strategy (hash, key_value, env, json, yaml, ...)
    pub source: String,

    /// Variables: inline JSON or a file path for file sources
    #[arg(short, long, default_value = "{}")]
    pub variables: String,

    /// Source options as inline JSON, e.g. {"raise_on_value_not_found": true}
    #[arg(short, long, default_value = "{}")]
    pub params: String,

    /// Export format (hash, json, yaml)
    #[arg(short, long, default_value = "yaml")]
    pub format: String,

    /// File the export is written to
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Deployment environment used to scope the variables
    #[arg(short, long)]
    pub environment: Option<String>,
}

impl ExportArgs {
    pub fn knowledge_config(&self) -> KnowledgeConfig {
        match &self.environment {
            Some(environment) => KnowledgeConfig::default().with_environment(environment.clone()),
            None => KnowledgeConfig::default(),
        }
    }
}

/// Learns from one source without touching the settings store and renders
/// the result in the requested format.
#[instrument]
pub fn execute(args: &ExportArgs, knowledge: &Knowledge) -> Result<String, Error> {
    let variables = parse_variables(&args.variables);
    let params = parse_params(&args.params)?;
    debug!(message = "Exporting", source = %args.source, format = %args.format);

    let mut export =
        knowledge.export_learnings_from_with_params(&args.source, variables, params)?;
    let exported = export.retarget(&args.format, args.destination.clone())?;

    if let Some(destination) = &args.destination {
        info!(message = "Export written", path = ?destination);
    }

    match exported {
        Exported::Text(text) => Ok(text),
        Exported::Map(map) => serde_json::to_string_pretty(&map)
            .map_err(|e| Error::InvalidArguments(format!("Cannot render export: {}", e))),
    }
}
