//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// kiln - recipe-driven build and packaging tool for native libraries
#[derive(Parser)]
#[command(name = "kiln")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recipe-driven build and packaging tool for native libraries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Args)]
pub struct GlobalArgs {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit the final result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Settings and option overrides shared by the build commands
#[derive(Args)]
pub struct BuildArgs {
    /// Path to the recipe file
    pub recipe: PathBuf,

    /// Skip the test stage after building
    #[arg(long)]
    pub skip_tests: bool,

    /// Build a shared library instead of the recipe default
    #[arg(long)]
    pub shared: bool,

    /// Override the fPIC option (ignored where not applicable)
    #[arg(long, value_name = "BOOL")]
    pub fpic: Option<bool>,

    /// Target operating system (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (defaults to the host)
    #[arg(long)]
    pub arch: Option<String>,

    /// Build type: debug, release, relwithdebinfo
    #[arg(long, value_name = "TYPE")]
    pub build_type: Option<String>,

    /// C++ standard the build environment provides
    #[arg(long, value_name = "YEAR", default_value_t = 20)]
    pub std: u32,

    /// Number of parallel build jobs (default: one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Build tree location
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Package output location
    #[arg(long, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,

    /// Dependency store location
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full lifecycle: build, test, install, publish
    Create {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Run the lifecycle through the test stage without packaging
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Export the recipe's sources to a self-contained tree
    Export {
        /// Path to the recipe file
        recipe: PathBuf,

        /// Export destination (defaults to the configured export root)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },
}
