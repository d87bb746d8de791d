//! Build settings supplied by the driving process
//!
//! Settings are the environment axes a recipe never chooses for itself:
//! target operating system, compiler, build type and architecture. They are
//! read-only for the whole lifecycle.

use kiln_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Freebsd,
}

impl Os {
    /// Whether the OS belongs to the Windows family, where the
    /// position-independent-code distinction does not exist.
    #[must_use]
    pub fn is_windows_family(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Detect the operating system kiln itself is running on
    #[must_use]
    pub fn host() -> Self {
        match std::env::consts::OS {
            "macos" => Self::Macos,
            "windows" => Self::Windows,
            "freebsd" => Self::Freebsd,
            _ => Self::Linux,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Macos => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Freebsd => write!(f, "freebsd"),
        }
    }
}

impl FromStr for Os {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            "freebsd" => Ok(Self::Freebsd),
            _ => Err(ConfigError::InvalidValue {
                field: "os".into(),
                value: s.into(),
            }),
        }
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gcc => write!(f, "gcc"),
            Self::Clang => write!(f, "clang"),
            Self::AppleClang => write!(f, "apple-clang"),
            Self::Msvc => write!(f, "msvc"),
        }
    }
}

impl FromStr for CompilerFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" | "appleclang" => Ok(Self::AppleClang),
            "msvc" => Ok(Self::Msvc),
            _ => Err(ConfigError::InvalidValue {
                field: "compiler".into(),
                value: s.into(),
            }),
        }
    }
}

/// C++ language standard revision
///
/// Ordering follows publication year, so `Cxx20 > Cxx17` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CxxStandard {
    Cxx11,
    Cxx14,
    Cxx17,
    Cxx20,
    Cxx23,
}

impl CxxStandard {
    /// The two-digit standard year as written in build files
    #[must_use]
    pub fn year(self) -> u32 {
        match self {
            Self::Cxx11 => 11,
            Self::Cxx14 => 14,
            Self::Cxx17 => 17,
            Self::Cxx20 => 20,
            Self::Cxx23 => 23,
        }
    }
}

impl TryFrom<u32> for CxxStandard {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            11 => Ok(Self::Cxx11),
            14 => Ok(Self::Cxx14),
            17 => Ok(Self::Cxx17),
            20 => Ok(Self::Cxx20),
            23 => Ok(Self::Cxx23),
            _ => Err(ConfigError::InvalidValue {
                field: "std".into(),
                value: value.to_string(),
            }),
        }
    }
}

impl From<CxxStandard> for u32 {
    fn from(std: CxxStandard) -> Self {
        std.year()
    }
}

impl fmt::Display for CxxStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

/// Compiler axis: family plus the language standard it is asked to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    /// Unset means the build environment did not declare a standard;
    /// recipes with a minimum standard reject such environments.
    #[serde(default)]
    pub cxx_standard: Option<CxxStandard>,
}

impl Compiler {
    #[must_use]
    pub fn new(family: CompilerFamily, cxx_standard: Option<CxxStandard>) -> Self {
        Self {
            family,
            cxx_standard,
        }
    }

    /// Default compiler family for an operating system
    #[must_use]
    pub fn default_for(os: Os) -> Self {
        let family = match os {
            Os::Macos => CompilerFamily::AppleClang,
            Os::Windows => CompilerFamily::Msvc,
            Os::Linux => CompilerFamily::Gcc,
            Os::Freebsd => CompilerFamily::Clang,
        };
        Self {
            family,
            cxx_standard: None,
        }
    }
}

/// Build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
}

impl BuildType {
    /// Spelling used by CMake's `CMAKE_BUILD_TYPE`
    #[must_use]
    pub fn cmake_name(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cmake_name())
    }
}

impl FromStr for BuildType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            _ => Err(ConfigError::InvalidValue {
                field: "build_type".into(),
                value: s.into(),
            }),
        }
    }
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    Aarch64,
    Armv7,
}

impl Arch {
    /// Detect the architecture kiln itself is running on
    #[must_use]
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "aarch64" => Self::Aarch64,
            "arm" => Self::Armv7,
            _ => Self::X86_64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => write!(f, "x86_64"),
            Self::Aarch64 => write!(f, "aarch64"),
            Self::Armv7 => write!(f, "armv7"),
        }
    }
}

impl FromStr for Arch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "aarch64" | "arm64" => Ok(Self::Aarch64),
            "armv7" => Ok(Self::Armv7),
            _ => Err(ConfigError::InvalidValue {
                field: "arch".into(),
                value: s.into(),
            }),
        }
    }
}

/// The full settings vector for one build
///
/// Supplied before any lifecycle stage runs and never written afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    /// Settings describing the machine kiln is running on
    #[must_use]
    pub fn host() -> Self {
        let os = Os::host();
        Self {
            os,
            compiler: Compiler::default_for(os),
            build_type: BuildType::Release,
            arch: Arch::host(),
        }
    }

    #[must_use]
    pub fn with_cxx_standard(mut self, std: CxxStandard) -> Self {
        self.compiler.cxx_standard = Some(std);
        self
    }
}
