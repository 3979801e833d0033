//! Error types for Lambda operations.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LambdaError>;

#[derive(Error, Debug)]
pub enum LambdaError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    /// The function is mid-update and rejected the change.
    #[error("Function is being updated: {0}")]
    Conflict(String),

    #[error("Failed to update configuration of '{function_name}' after {attempts} attempts")]
    RetriesExhausted { function_name: String, attempts: u32 },

    #[error("A role ARN is required to create function '{function_name}'")]
    MissingRole { function_name: String },

    #[error("Failed to read package {}: {source}", path.display())]
    Package {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl LambdaError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, LambdaError::Conflict(_))
    }
}
