//! External build tool error types
//!
//! Each variant corresponds to one of the four verbs kiln delegates to the
//! build tool. A failed stage leaves artifacts from earlier stages intact;
//! a failed test run does not invalidate the build output.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ToolError {
    #[error("{tool} not found on PATH")]
    ToolNotFound { tool: String },

    #[error("configure failed: {message}")]
    ConfigureFailed { message: String },

    #[error("build failed: {message}")]
    BuildFailed { message: String },

    #[error("tests failed: {message}")]
    TestsFailed { message: String },

    #[error("install failed: {message}")]
    InstallFailed { message: String },
}

impl UserFacingError for ToolError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolNotFound { .. } => {
                Some("Install CMake and CTest and make sure they are on PATH.")
            }
            Self::TestsFailed { .. } => {
                Some("Build artifacts are still valid; rerun with --skip-tests to package anyway.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ToolNotFound { .. } => "tool.not_found",
            Self::ConfigureFailed { .. } => "tool.configure_failed",
            Self::BuildFailed { .. } => "tool.build_failed",
            Self::TestsFailed { .. } => "tool.tests_failed",
            Self::InstallFailed { .. } => "tool.install_failed",
        };
        Some(code)
    }
}
