use color_print::cformat;
use thiserror::Error;

use crate::{
    auth::AuthError, client::ApiError, configuration::ConfigurationError,
    credentials::CredentialError, exit_codes::DocmostExitCode, format::FormattingError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error reading or writing the stored token
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
    /// Error related to output formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    #[error("{0}")]
    InvalidArgument(String),
    /// Classified failure of a Docmost API call
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// Failure of the login exchange
    #[error("{0}")]
    AuthError(#[from] AuthError),
    #[error("Prompt error: {0}")]
    PromptError(#[from] inquire::InquireError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> DocmostExitCode {
        match self {
            CliError::UnsupportedSubcommand(_)
            | CliError::MissingRequiredArgument(_)
            | CliError::InvalidArgument(_) => DocmostExitCode::UsageError,
            _ => DocmostExitCode::Failure,
        }
    }
}

/// Prints `error` on stderr with the error marker.
pub fn report_error<E: std::fmt::Display>(error: &E) {
    eprintln!("{}", cformat!("<red>✗</red> {}", error));
}
