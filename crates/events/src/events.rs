//! Domain-grouped event definitions

use semver::Version;
use serde::Serialize;
use std::path::PathBuf;

/// Top-level event type, grouped by functional domain
#[derive(Debug, Clone, Serialize)]
pub enum AppEvent {
    General(GeneralEvent),
    Build(BuildEvent),
    Resolver(ResolverEvent),
}

/// General-purpose log and operation events
#[derive(Debug, Clone, Serialize)]
pub enum GeneralEvent {
    DebugLog {
        message: String,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
        details: Option<String>,
    },
    OperationStarted {
        operation: String,
    },
    OperationCompleted {
        operation: String,
        success: bool,
    },
    OperationFailed {
        operation: String,
        error: String,
    },
}

impl GeneralEvent {
    pub fn debug(message: impl Into<String>) -> Self {
        Self::DebugLog {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            details: None,
        }
    }

    pub fn error_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// Build lifecycle events
#[derive(Debug, Clone, Serialize)]
pub enum BuildEvent {
    SessionStarted {
        session_id: String,
        package: String,
        version: Version,
    },
    PhaseStarted {
        phase: String,
    },
    PhaseCompleted {
        phase: String,
    },
    CommandStarted {
        command: String,
        working_dir: PathBuf,
    },
    TestsSkipped,
    Completed {
        package: String,
        version: Version,
        path: PathBuf,
    },
}

/// Dependency resolution events
#[derive(Debug, Clone, Serialize)]
pub enum ResolverEvent {
    Resolving {
        count: usize,
    },
    Resolved {
        name: String,
        version: Version,
        prefix: PathBuf,
    },
}
