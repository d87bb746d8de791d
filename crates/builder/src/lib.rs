#![deny(clippy::pedantic, unsafe_code)]
//! Recipe lifecycle engine for kiln
//!
//! This crate drives a recipe through its build lifecycle: option
//! resolution, dependency resolution, source export, generation of the
//! build-tool input files, the configure/build/test sequence, installation
//! into a package tree, and publication of the consumer-facing layout.
//! The native build itself is delegated to CMake; kiln only orchestrates.

mod builder;
mod cmake;
mod context;
mod executor;
mod export;
mod fileops;
mod generate;
mod lifecycle;
mod options;
mod package;
mod publish;
mod recipe;
mod resolve;

pub use builder::{BuildOutcome, Builder};
pub use cmake::{Cmake, TestReport};
pub use context::BuildContext;
pub use executor::CommandResult;
pub use export::export_sources;
pub use generate::{generate_inputs, GeneratedInputs};
pub use lifecycle::{Lifecycle, Phase};
pub use options::resolve_options;
pub use package::copy_build_support;
pub use publish::{publish_layout, LAYOUT_FILE};
pub use recipe::model::{ConsumerMetadata, ExportManifest, Recipe};
pub use recipe::parser::{parse_recipe, parse_recipe_from_str};
pub use resolve::{DependencyResolver, ResolvedDependency, StoreResolver};
