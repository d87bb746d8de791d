#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration loading for kiln
//!
//! Configuration precedence is file, then environment, then CLI flags;
//! the CLI applies its flags on top of the loaded `Config`.

use kiln_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Order in which the generator writes its two descriptor sets
///
/// Toolchain generation may want to know which dependencies are
/// header-only versus linked, so dependency descriptors go first by
/// default; the opposite order is available until that requirement is
/// settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorOrder {
    DepsFirst,
    ToolchainFirst,
}

impl Default for DescriptorOrder {
    fn default() -> Self {
        Self::DepsFirst
    }
}

impl fmt::Display for DescriptorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepsFirst => write!(f, "deps-first"),
            Self::ToolchainFirst => write!(f, "toolchain-first"),
        }
    }
}

/// Build stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Skip the test stage after building (default: tests run)
    #[serde(default)]
    pub skip_tests: bool,
    /// Parallel build jobs; unset means one per CPU
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            skip_tests: false,
            jobs: None,
        }
    }
}

impl BuildConfig {
    /// Effective parallelism for the build step
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub order: DescriptorOrder,
}

/// Filesystem roots used by the lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_build_root")]
    pub build_root: PathBuf,
    #[serde(default = "default_export_root")]
    pub export_root: PathBuf,
    #[serde(default = "default_package_root")]
    pub package_root: PathBuf,
    /// Root of the local dependency artifact store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_root: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            build_root: default_build_root(),
            export_root: default_export_root(),
            package_root: default_package_root(),
            store_root: None,
        }
    }
}

impl PathConfig {
    /// Store root with the home-directory fallback applied
    #[must_use]
    pub fn effective_store_root(&self) -> PathBuf {
        self.store_root.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".kiln")
                .join("store")
        })
    }
}

/// Top-level kiln configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist and
    /// `ConfigError::ParseError` if it is not valid TOML.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = tokio::fs::read_to_string(path).await.map_err(|_| {
            Error::Config(ConfigError::NotFound {
                path: path.display().to_string(),
            })
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            Error::Config(ConfigError::ParseError {
                message: e.to_string(),
            })
        })?;
        Ok(config)
    }

    /// Load configuration from a file if it exists, otherwise defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if an existing file is not valid TOML.
    pub async fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path).await
        } else {
            debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Default config file location
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kiln")
            .join("config.toml")
    }

    /// Merge environment variables into the configuration
    ///
    /// Recognized: `KILN_SKIP_TESTS`, `KILN_JOBS`, `KILN_STORE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unparsable values.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(value) = std::env::var("KILN_SKIP_TESTS") {
            self.build.skip_tests = parse_bool("KILN_SKIP_TESTS", &value)?;
        }
        if let Ok(value) = std::env::var("KILN_JOBS") {
            let jobs = value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "KILN_JOBS".into(),
                    value: value.clone(),
                })?;
            self.build.jobs = Some(jobs);
        }
        if let Ok(value) = std::env::var("KILN_STORE") {
            self.paths.store_root = Some(PathBuf::from(value));
        }
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, Error> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
        })),
    }
}

fn default_build_root() -> PathBuf {
    PathBuf::from("build")
}

fn default_export_root() -> PathBuf {
    PathBuf::from("export")
}

fn default_package_root() -> PathBuf {
    PathBuf::from("package")
}
