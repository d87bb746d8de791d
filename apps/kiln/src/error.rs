//! CLI-level error reporting

use kiln_errors::{Error, UserFacingError};
use std::fmt;

/// Error wrapper for the CLI layer
#[derive(Debug)]
pub struct CliError(pub Error);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.user_message())
    }
}

impl std::error::Error for CliError {}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<kiln_errors::ConfigError> for CliError {
    fn from(err: kiln_errors::ConfigError) -> Self {
        Self(err.into())
    }
}

impl CliError {
    /// Render the error to stderr, with the remediation hint if there is one
    pub fn report(&self) {
        eprintln!("error: {}", self.0.user_message());
        if let Some(hint) = self.0.user_hint() {
            eprintln!("  hint: {hint}");
        }
    }
}
