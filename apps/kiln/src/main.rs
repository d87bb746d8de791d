//! kiln - recipe-driven build and packaging tool for native libraries
//!
//! The CLI is the driving process: it supplies settings and option
//! overrides, then invokes the lifecycle stages in their fixed order
//! through the builder crate.

mod cli;
mod error;
mod events;
mod logging;

use crate::cli::{BuildArgs, Cli, Commands};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use kiln_builder::{
    export_sources, parse_recipe, resolve_options, BuildContext, Builder, StoreResolver,
};
use kiln_config::Config;
use kiln_events::EventSender;
use kiln_types::{Compiler, CxxStandard, Settings};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.debug);

    if let Err(e) = run(cli).await {
        e.report();
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("kiln v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: file config, then environment, then CLI flags
    let config_path = cli
        .global
        .config
        .clone()
        .unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path).await?;
    config.merge_env()?;

    let (sender, mut receiver) = kiln_events::channel();
    let handler = EventHandler::new(cli.global.debug);
    let printer = tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            handler.handle_event(&event);
        }
    });

    let result = execute(cli, config, sender).await;

    // All senders are gone once execute returns; drain the remainder
    let _ = printer.await;
    result
}

async fn execute(cli: Cli, mut config: Config, sender: EventSender) -> Result<(), CliError> {
    match cli.command {
        Commands::Create { args } => {
            apply_build_args(&mut config, &args);
            let ctx = build_context(&args, &config, sender.clone()).await?;
            let builder = builder_for(config, &sender);
            drop(sender);

            let layout = builder.create(&ctx).await?;
            if cli.global.json {
                let json = serde_json::to_string_pretty(&layout)
                    .map_err(|e| kiln_errors::Error::internal(e.to_string()))?;
                println!("{json}");
            }
            Ok(())
        }

        Commands::Build { args } => {
            apply_build_args(&mut config, &args);
            let ctx = build_context(&args, &config, sender.clone()).await?;
            let builder = builder_for(config, &sender);
            drop(sender);

            let outcome = builder.build(&ctx).await?;
            if let Some(report) = outcome.test_report {
                println!("Tests: {}/{} passed", report.passed, report.total);
            }
            Ok(())
        }

        Commands::Export { recipe, dest } => {
            let parsed = parse_recipe(&recipe).await?;
            let recipe_dir = parent_dir(&recipe);
            let dest = dest.unwrap_or_else(|| config.paths.export_root.clone());

            export_sources(&parsed, &recipe_dir, &dest, Some(&sender)).await?;
            drop(sender);

            println!("Exported {} -> {}", parsed.metadata, dest.display());
            Ok(())
        }
    }
}

/// Fold the command-line build flags into the loaded configuration
fn apply_build_args(config: &mut Config, args: &BuildArgs) {
    if args.skip_tests {
        config.build.skip_tests = true;
    }
    if let Some(jobs) = args.jobs {
        config.build.jobs = Some(jobs);
    }
    if let Some(store) = &args.store {
        config.paths.store_root = Some(store.clone());
    }
}

fn builder_for(config: Config, sender: &EventSender) -> Builder {
    let resolver =
        StoreResolver::new(config.paths.effective_store_root()).with_event_sender(sender.clone());
    Builder::new(config).with_resolver(Box::new(resolver))
}

/// Assemble the immutable build context from recipe, settings and options
async fn build_context(
    args: &BuildArgs,
    config: &Config,
    sender: EventSender,
) -> Result<BuildContext, CliError> {
    let recipe = parse_recipe(&args.recipe).await?;
    let settings = settings_from_args(args)?;

    // Recipe defaults first, CLI overrides on top
    let mut request = recipe.default_option_request();
    if args.shared {
        request.shared = Some(true);
    }
    if let Some(fpic) = args.fpic {
        request.fpic = Some(fpic);
    }
    let options = resolve_options(&settings, &request);
    info!("resolved options: {options}");

    let build_dir = args
        .build_dir
        .clone()
        .unwrap_or_else(|| config.paths.build_root.clone());
    let package_dir = args
        .package_dir
        .clone()
        .unwrap_or_else(|| config.paths.package_root.clone());

    Ok(BuildContext::new(
        recipe,
        parent_dir(&args.recipe),
        settings,
        options,
        build_dir,
        package_dir,
    )
    .with_event_sender(sender))
}

/// Settings default to the host; every axis is overridable
fn settings_from_args(args: &BuildArgs) -> Result<Settings, CliError> {
    let mut settings = Settings::host();

    if let Some(os) = &args.os {
        settings.os = os.parse()?;
        settings.compiler = Compiler::default_for(settings.os);
    }
    if let Some(arch) = &args.arch {
        settings.arch = arch.parse()?;
    }
    if let Some(build_type) = &args.build_type {
        settings.build_type = build_type.parse()?;
    }
    settings = settings.with_cxx_standard(CxxStandard::try_from(args.std)?);

    Ok(settings)
}

fn parent_dir(recipe: &Path) -> PathBuf {
    let parent = recipe.parent().unwrap_or_else(|| Path::new("."));
    if parent.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        parent.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir_of_bare_file() {
        assert_eq!(parent_dir(Path::new("recipe.yaml")), PathBuf::from("."));
        assert_eq!(
            parent_dir(Path::new("demo/recipe.yaml")),
            PathBuf::from("demo")
        );
    }

    #[test]
    fn test_settings_overrides() {
        let args = BuildArgs {
            recipe: PathBuf::from("recipe.yaml"),
            skip_tests: false,
            shared: false,
            fpic: None,
            os: Some("windows".to_string()),
            arch: Some("aarch64".to_string()),
            build_type: Some("debug".to_string()),
            std: 20,
            jobs: None,
            build_dir: None,
            package_dir: None,
            store: None,
        };
        let settings = settings_from_args(&args).unwrap();
        assert!(settings.os.is_windows_family());
        assert_eq!(settings.arch, kiln_types::Arch::Aarch64);
        assert_eq!(settings.build_type, kiln_types::BuildType::Debug);
        assert_eq!(
            settings.compiler.cxx_standard,
            Some(CxxStandard::Cxx20)
        );
    }

    #[test]
    fn test_invalid_std_is_rejected() {
        let args = BuildArgs {
            recipe: PathBuf::from("recipe.yaml"),
            skip_tests: false,
            shared: false,
            fpic: None,
            os: None,
            arch: None,
            build_type: None,
            std: 19,
            jobs: None,
            build_dir: None,
            package_dir: None,
            store: None,
        };
        assert!(settings_from_args(&args).is_err());
    }
}
