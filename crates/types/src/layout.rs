//! Consumer-facing package layout
//!
//! The layout is the only state kiln persists for the outside world: which
//! directories hold build-integration files, what target a consumer links
//! against, and which runtime requirements travel with the package.

use semver::Version;
use serde::{Deserialize, Serialize};

/// A propagated runtime requirement as seen by consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequirement {
    pub name: String,
    pub version: Version,
}

/// The published description of one built package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLayout {
    /// Relative directories inside the package holding build-integration files
    pub builddirs: Vec<String>,
    /// Namespaced target name consumers link against
    pub target: String,
    /// Compiled artifact names consumers must link
    pub libraries: Vec<String>,
    /// Runtime requirements that propagate to consumers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<LayoutRequirement>,
}
