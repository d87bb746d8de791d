#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for kiln
//!
//! The data model is deliberately small: an immutable recipe identity, the
//! externally supplied build settings, the finalized option set, declared
//! requirements, and the consumer-facing package layout. Everything here is
//! plain data; the lifecycle logic lives in `kiln-builder`.

pub mod identity;
pub mod layout;
pub mod options;
pub mod requirement;
pub mod settings;

pub use identity::{PackageKind, RecipeIdentity};
pub use layout::{LayoutRequirement, PackageLayout};
pub use options::{OptionRequest, OptionSet};
pub use requirement::{Requirement, RequirementRole};
pub use settings::{Arch, BuildType, Compiler, CompilerFamily, CxxStandard, Os, Settings};

// Exact version pins are the only version form kiln deals in
pub use semver::Version;
