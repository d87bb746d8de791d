//! Configuration and recipe validation error types
//!
//! Everything here is raised before any external process starts: a
//! malformed recipe, a bad kiln.toml, or a lifecycle stage invoked out of
//! order. None of these are recoverable by retrying.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("config parse error: {message}")]
    ParseError { message: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("invalid recipe: {message}")]
    InvalidRecipe { message: String },

    #[error("declared export path does not exist: {path}")]
    MissingExportPath { path: String },

    #[error("recipe requires C++{required} but the compiler standard is not set")]
    StandardNotSet { required: u32 },

    #[error("recipe requires C++{required} but the build environment provides C++{found}")]
    UnsupportedStandard { required: u32, found: u32 },

    #[error("stage {stage} invoked in phase {phase}")]
    StageOrder { stage: String, phase: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidRecipe { .. } | Self::MissingExportPath { .. } => {
                Some("Correct the recipe definition before retrying.")
            }
            Self::StandardNotSet { .. } | Self::UnsupportedStandard { .. } => {
                Some("Select a compiler standard at or above the recipe's minimum.")
            }
            Self::StageOrder { .. } => {
                Some("Lifecycle stages must run in order: configure, build, test, install.")
            }
            Self::NotFound { .. } | Self::ParseError { .. } | Self::InvalidValue { .. } => {
                Some("Check your kiln configuration file.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NotFound { .. } => "config.not_found",
            Self::ParseError { .. } => "config.parse_error",
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::InvalidRecipe { .. } => "config.invalid_recipe",
            Self::MissingExportPath { .. } => "config.missing_export_path",
            Self::StandardNotSet { .. } => "config.standard_not_set",
            Self::UnsupportedStandard { .. } => "config.unsupported_standard",
            Self::StageOrder { .. } => "config.stage_order",
        };
        Some(code)
    }
}
