//! Dependency resolution error types
//!
//! Pins are exact, so an unsatisfied requirement cannot succeed on retry
//! without operator intervention; the resolver's failure is surfaced
//! verbatim and the lifecycle halts.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("no artifact for {name} {version} in the dependency store")]
    Unsatisfied { name: String, version: String },

    #[error("dependency store at {path} is unusable: {message}")]
    InvalidStore { path: String, message: String },
}

impl UserFacingError for ResolveError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Unsatisfied { .. } => {
                Some("Publish the pinned version to the store or adjust the recipe pin.")
            }
            Self::InvalidStore { .. } => Some("Check the store path in your kiln configuration."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Unsatisfied { .. } => "resolve.unsatisfied",
            Self::InvalidStore { .. } => "resolve.invalid_store",
        };
        Some(code)
    }
}
