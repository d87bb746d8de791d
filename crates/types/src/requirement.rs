//! Declared dependency requirements
//!
//! kiln only deals in exact pins; version-range resolution belongs to the
//! external resolver, never to the recipe.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Propagation role of a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementRole {
    /// Part of the public dependency surface; propagates to consumers
    Runtime,
    /// Visible only while building and testing this recipe
    BuildAndTest,
}

impl RequirementRole {
    /// Whether requirements with this role appear in consumer metadata
    #[must_use]
    pub fn propagates(self) -> bool {
        matches!(self, Self::Runtime)
    }
}

impl fmt::Display for RequirementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => write!(f, "runtime"),
            Self::BuildAndTest => write!(f, "build-and-test"),
        }
    }
}

/// A single declared dependency: name, exact version pin, role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub version: Version,
    pub role: RequirementRole,
}

impl Requirement {
    pub fn runtime(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            role: RequirementRole::Runtime,
        }
    }

    pub fn build_and_test(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            role: RequirementRole::BuildAndTest,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagation() {
        assert!(RequirementRole::Runtime.propagates());
        assert!(!RequirementRole::BuildAndTest.propagates());
    }

    #[test]
    fn test_display() {
        let req = Requirement::runtime("fmt", Version::new(9, 1, 0));
        assert_eq!(req.to_string(), "fmt 9.1.0 (runtime)");
    }
}
