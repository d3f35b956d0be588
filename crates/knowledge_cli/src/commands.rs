//! Command modules for the knowledge CLI.
//!
//! - `learn_cmd`: one-shot learning into the settings store
//! - `export_cmd`: one-shot learning straight into an export format
//! - `learner_cmd`: `gather` and `backup` driven by the configuration file
//! - `init_cmd`: creation of a starter configuration file

use knowledge::VariableMap;
use serde_json::Value;

use crate::errors::Error;

pub mod export_cmd;
pub mod init_cmd;
pub mod learn_cmd;
pub mod learner_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Reads a `--variables` argument: inline JSON when it parses as such,
/// otherwise a file path.
pub fn parse_variables(input: &str) -> Value {
    serde_json::from_str(input).unwrap_or_else(|_| Value::String(input.to_string()))
}

/// Reads a `--params` argument, which must be an inline JSON object.
pub fn parse_params(input: &str) -> Result<VariableMap, Error> {
    serde_json::from_str(input)
        .map_err(|e| Error::InvalidArguments(format!("Params must be a JSON object: {}", e)))
}
