//! Build lifecycle state machine
//!
//! The lifecycle is an explicit finite-state machine rather than a
//! convention: every stage checks the current phase before the external
//! tool runs and advances only after it succeeds, so a phase is always a
//! statement about completed work. Out-of-order invocation is rejected
//! with `ConfigError::StageOrder`.
//!
//! Allowed order: Unconfigured -> Configured -> Built -> TestedOrSkipped
//! -> Terminal, with install permitted from Built onwards.

use kiln_errors::{ConfigError, Error};
use std::fmt;

/// Phase of the build lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Configured,
    Built,
    TestedOrSkipped,
    Terminal,
}

impl Phase {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::Built => "built",
            Self::TestedOrSkipped => "tested-or-skipped",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The lifecycle tracker
///
/// Owns nothing but the phase; settings and options travel separately as
/// immutable values.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Unconfigured,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn expect(&self, stage: &str, allowed: &[Phase]) -> Result<(), Error> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ConfigError::StageOrder {
                stage: stage.to_string(),
                phase: self.phase.name().to_string(),
            }
            .into())
        }
    }

    /// Check that the configure stage may run now
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless the lifecycle is fresh.
    pub fn begin_configure(&self) -> Result<(), Error> {
        self.expect("configure", &[Phase::Unconfigured])
    }

    /// Record a successful configure
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless the lifecycle is fresh.
    pub fn mark_configured(&mut self) -> Result<(), Error> {
        self.expect("configure", &[Phase::Unconfigured])?;
        self.phase = Phase::Configured;
        Ok(())
    }

    /// Check that the build stage may run now
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless configure has completed.
    pub fn begin_build(&self) -> Result<(), Error> {
        self.expect("build", &[Phase::Configured])
    }

    /// Record a successful build
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless configure has completed.
    pub fn mark_built(&mut self) -> Result<(), Error> {
        self.expect("build", &[Phase::Configured])?;
        self.phase = Phase::Built;
        Ok(())
    }

    /// Check that the test stage may run (or be skipped) now
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless the build has completed.
    pub fn begin_test(&self) -> Result<(), Error> {
        self.expect("test", &[Phase::Built])
    }

    /// Record that tests ran or were deliberately skipped
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless the build has completed.
    pub fn mark_tested_or_skipped(&mut self) -> Result<(), Error> {
        self.expect("test", &[Phase::Built])?;
        self.phase = Phase::TestedOrSkipped;
        Ok(())
    }

    /// Check that installation is permitted in the current phase
    ///
    /// Install is a usage error before the build has produced artifacts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` before the Built phase.
    pub fn ensure_installable(&self) -> Result<(), Error> {
        self.expect("install", &[Phase::Built, Phase::TestedOrSkipped])
    }

    /// Finish the lifecycle
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StageOrder` unless the test stage ran or was
    /// skipped.
    pub fn finish(&mut self) -> Result<(), Error> {
        self.expect("finish", &[Phase::TestedOrSkipped])?;
        self.phase = Phase::Terminal;
        Ok(())
    }
}
