//! Recipe identity metadata

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of artifact the recipe produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageKind {
    Library,
    HeaderLibrary,
    Application,
}

impl Default for PackageKind {
    fn default() -> Self {
        Self::Library
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library => write!(f, "library"),
            Self::HeaderLibrary => write!(f, "header-library"),
            Self::Application => write!(f, "application"),
        }
    }
}

/// Immutable identity of one recipe: set at definition time, never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIdentity {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub kind: PackageKind,
    pub license: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl fmt::Display for RecipeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let identity = RecipeIdentity {
            name: "corekit".into(),
            version: Version::new(0, 1, 0),
            kind: PackageKind::Library,
            license: "MIT".into(),
            description: "Utility library".into(),
            author: None,
            homepage: None,
        };
        assert_eq!(identity.to_string(), "corekit/0.1.0");
    }
}
