//! YAML recipe manifest structure
//!
//! A recipe declares the identity of one library version, its option
//! defaults, its requirements with their propagation roles, the source
//! paths that travel with an export, the minimum language standard, and
//! the metadata consumers see. The recipe never chooses settings; those
//! come from the driving process.

use kiln_errors::{ConfigError, Error};
use kiln_types::{
    CxxStandard, OptionRequest, RecipeIdentity, Requirement, RequirementRole, Settings,
};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A dependency entry as written in the manifest (role comes from the section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRequirement {
    pub name: String,
    pub version: Version,
}

/// Requirements grouped by propagation role
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsSection {
    /// Public dependency surface; propagates to consumers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtime: Vec<ManifestRequirement>,
    /// Visible only while building and testing this recipe
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test: Vec<ManifestRequirement>,
}

impl RequirementsSection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.test.is_empty()
    }
}

/// Default option values declared by the recipe
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionDefaults {
    #[serde(default)]
    pub shared: bool,
    #[serde(default = "default_fpic")]
    pub fpic: bool,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: default_fpic(),
        }
    }
}

fn default_fpic() -> bool {
    true
}

/// The four source path classes that must travel with an exported recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Build-script file
    #[serde(default = "default_script")]
    pub script: PathBuf,
    /// Auxiliary build-support directory
    #[serde(default = "default_support")]
    pub support: PathBuf,
    /// Public headers directory
    #[serde(default = "default_include")]
    pub include: PathBuf,
    /// Implementation sources directory
    #[serde(default = "default_sources")]
    pub sources: PathBuf,
}

impl Default for ExportManifest {
    fn default() -> Self {
        Self {
            script: default_script(),
            support: default_support(),
            include: default_include(),
            sources: default_sources(),
        }
    }
}

fn default_script() -> PathBuf {
    PathBuf::from("CMakeLists.txt")
}

fn default_support() -> PathBuf {
    PathBuf::from("cmake")
}

fn default_include() -> PathBuf {
    PathBuf::from("include")
}

fn default_sources() -> PathBuf {
    PathBuf::from("src")
}

/// Consumer-facing declaration: where build-integration files live and
/// what a downstream build links against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerMetadata {
    #[serde(default = "default_builddirs")]
    pub builddirs: Vec<String>,
    pub target: String,
    pub libraries: Vec<String>,
}

fn default_builddirs() -> Vec<String> {
    vec!["cmake".to_string()]
}

/// A parsed recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub metadata: RecipeIdentity,

    /// Minimum C++ standard the build environment must provide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<CxxStandard>,

    #[serde(default)]
    pub options: OptionDefaults,

    #[serde(default, skip_serializing_if = "RequirementsSection::is_empty")]
    pub requirements: RequirementsSection,

    #[serde(default)]
    pub export: ExportManifest,

    pub package: ConsumerMetadata,
}

impl Recipe {
    /// All declared requirements with their roles applied
    #[must_use]
    pub fn declared_requirements(&self) -> Vec<Requirement> {
        let mut all = Vec::with_capacity(
            self.requirements.runtime.len() + self.requirements.test.len(),
        );
        for entry in &self.requirements.runtime {
            all.push(Requirement {
                name: entry.name.clone(),
                version: entry.version.clone(),
                role: RequirementRole::Runtime,
            });
        }
        for entry in &self.requirements.test {
            all.push(Requirement {
                name: entry.name.clone(),
                version: entry.version.clone(),
                role: RequirementRole::BuildAndTest,
            });
        }
        all
    }

    /// Requirements that propagate to consumers
    #[must_use]
    pub fn runtime_requirements(&self) -> Vec<Requirement> {
        self.declared_requirements()
            .into_iter()
            .filter(|req| req.role.propagates())
            .collect()
    }

    /// The option request implied by the recipe's declared defaults
    #[must_use]
    pub fn default_option_request(&self) -> OptionRequest {
        OptionRequest {
            shared: Some(self.options.shared),
            fpic: Some(self.options.fpic),
        }
    }

    /// Validate this recipe against the build settings
    ///
    /// Runs before any external process: a recipe whose minimum standard
    /// the environment cannot provide never reaches configure.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StandardNotSet` when the settings carry no
    /// standard and `ConfigError::UnsupportedStandard` when the declared
    /// standard is below the recipe's minimum.
    pub fn validate(&self, settings: &Settings) -> Result<(), Error> {
        if let Some(required) = self.standard {
            match settings.compiler.cxx_standard {
                None => {
                    return Err(ConfigError::StandardNotSet {
                        required: required.year(),
                    }
                    .into());
                }
                Some(found) if found < required => {
                    return Err(ConfigError::UnsupportedStandard {
                        required: required.year(),
                        found: found.year(),
                    }
                    .into());
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
