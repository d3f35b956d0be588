use std::io;

use knowledge::KnowledgeError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the knowledge CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading, parsing or saving the
    /// `knowledge.toml` file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The knowledge pipeline failed.
    ///
    /// Wraps every error raised while resolving strategies, reading variable
    /// files, running adapters or exporting.
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// Failed to write the command output.
    #[error("Failed to write output.")]
    Output(io::Error),
}
