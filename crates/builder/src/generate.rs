//! Build-tool input generation
//!
//! Writes the two descriptor sets CMake consumes: a dependency descriptor
//! mapping each resolved requirement to its prefix, and a toolchain
//! descriptor capturing the settings vector and the finalized option set.
//! The write order is configurable; the reference behavior writes the
//! dependency descriptor first.

use crate::context::BuildContext;
use crate::resolve::ResolvedDependency;
use kiln_config::DescriptorOrder;
use kiln_errors::Error;
use kiln_events::EventEmitter;
use kiln_types::{Arch, Os};
use std::fmt::Write as _;
use std::path::PathBuf;
use tokio::fs;

/// Paths of the generated build-tool input files
#[derive(Debug, Clone)]
pub struct GeneratedInputs {
    pub deps_file: PathBuf,
    pub toolchain_file: PathBuf,
}

/// Generate dependency and toolchain descriptors into the build tree
///
/// # Errors
///
/// Returns an I/O error if the generator directory cannot be written.
pub async fn generate_inputs(
    ctx: &BuildContext,
    resolved: &[ResolvedDependency],
    order: DescriptorOrder,
) -> Result<GeneratedInputs, Error> {
    let generators_dir = ctx.generators_dir();
    fs::create_dir_all(&generators_dir).await?;

    let deps_file = generators_dir.join("dependencies.cmake");
    let toolchain_file = generators_dir.join("toolchain.cmake");

    let deps_content = render_dependencies(resolved);
    let toolchain_content = render_toolchain(ctx);

    match order {
        DescriptorOrder::DepsFirst => {
            fs::write(&deps_file, deps_content).await?;
            fs::write(&toolchain_file, toolchain_content).await?;
        }
        DescriptorOrder::ToolchainFirst => {
            fs::write(&toolchain_file, toolchain_content).await?;
            fs::write(&deps_file, deps_content).await?;
        }
    }

    ctx.emit_debug(format!(
        "generated build-tool inputs in {}",
        generators_dir.display()
    ));

    Ok(GeneratedInputs {
        deps_file,
        toolchain_file,
    })
}

fn render_dependencies(resolved: &[ResolvedDependency]) -> String {
    let mut out = String::from("# Dependency locations resolved by kiln\n");
    for dep in resolved {
        let _ = writeln!(
            out,
            "list(APPEND CMAKE_PREFIX_PATH \"{}\")",
            dep.prefix.display()
        );
        let _ = writeln!(
            out,
            "set({}_ROOT \"{}\")",
            dep.requirement.name,
            dep.prefix.display()
        );
    }
    out
}

fn render_toolchain(ctx: &BuildContext) -> String {
    let settings = &ctx.settings;
    let options = &ctx.options;

    let mut out = format!(
        "# Toolchain settings generated by kiln for {}\n",
        ctx.recipe.metadata
    );
    let _ = writeln!(
        out,
        "set(CMAKE_SYSTEM_NAME {})",
        cmake_system_name(settings.os)
    );
    let _ = writeln!(
        out,
        "set(CMAKE_SYSTEM_PROCESSOR {})",
        cmake_processor(settings.arch)
    );
    let _ = writeln!(
        out,
        "set(CMAKE_BUILD_TYPE {} CACHE STRING \"Build type\")",
        settings.build_type.cmake_name()
    );

    if let Some(standard) = settings.compiler.cxx_standard {
        let _ = writeln!(out, "set(CMAKE_CXX_STANDARD {standard})");
        let _ = writeln!(out, "set(CMAKE_CXX_STANDARD_REQUIRED ON)");
    }

    let _ = writeln!(
        out,
        "set(BUILD_SHARED_LIBS {} CACHE BOOL \"Shared build\")",
        on_off(options.shared)
    );

    // Emitted only when the option exists on this target
    if let Some(fpic) = options.fpic {
        let _ = writeln!(
            out,
            "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"PIC\")",
            on_off(fpic)
        );
    }

    out.push_str("include(\"${CMAKE_CURRENT_LIST_DIR}/dependencies.cmake\" OPTIONAL)\n");
    out
}

fn cmake_system_name(os: Os) -> &'static str {
    match os {
        Os::Linux => "Linux",
        Os::Macos => "Darwin",
        Os::Windows => "Windows",
        Os::Freebsd => "FreeBSD",
    }
}

fn cmake_processor(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x86_64",
        Arch::Aarch64 => "aarch64",
        Arch::Armv7 => "armv7",
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}
