//! End-to-end lifecycle tests for the builder crate
//!
//! The external build tool is replaced by small shell scripts that log
//! their invocations, so the tests observe exactly which verbs ran and
//! with which arguments.

#[cfg(all(test, unix))]
mod tests {
    use kiln_builder::{
        parse_recipe, parse_recipe_from_str, BuildContext, Builder, Cmake, LAYOUT_FILE,
    };
    use kiln_config::Config;
    use kiln_errors::{ConfigError, Error, ResolveError, ToolError};
    use kiln_types::{
        Arch, BuildType, Compiler, CompilerFamily, CxxStandard, OptionRequest, Os, PackageLayout,
        RequirementRole, Settings, Version,
    };
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const RECIPE: &str = r#"
metadata:
  name: corekit
  version: 0.1.0
  kind: library
  license: MIT
  description: Functions and types shared across native projects

standard: 20

requirements:
  runtime:
    - { name: fmt, version: 9.1.0 }
  test:
    - { name: gtest, version: 1.17.0 }

package:
  builddirs: [cmake]
  target: corekit::corekit
  libraries: [corekit]
"#;

    struct Harness {
        temp: TempDir,
        config: Config,
        cmake_log: PathBuf,
        ctest_log: PathBuf,
        cmake: PathBuf,
        ctest: PathBuf,
    }

    fn write_tool(path: &Path, log: &Path, exit_code: i32) {
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {exit_code}\n",
            log.display()
        );
        std::fs::write(path, script).unwrap();
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
    }

    fn harness() -> Harness {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        // Recipe working tree
        std::fs::create_dir_all(root.join("work/cmake")).unwrap();
        std::fs::create_dir_all(root.join("work/include/corekit")).unwrap();
        std::fs::create_dir_all(root.join("work/src")).unwrap();
        std::fs::write(root.join("work/CMakeLists.txt"), "project(corekit)").unwrap();
        std::fs::write(root.join("work/cmake/corekit-config.cmake"), "# glue").unwrap();
        std::fs::write(root.join("work/include/corekit/span.hpp"), "#pragma once").unwrap();
        std::fs::write(root.join("work/src/span.cpp"), "// impl").unwrap();

        // Dependency store with both pins present
        std::fs::create_dir_all(root.join("store/fmt/9.1.0")).unwrap();
        std::fs::create_dir_all(root.join("store/gtest/1.17.0")).unwrap();

        // Fake build tools
        let cmake_log = root.join("cmake.log");
        let ctest_log = root.join("ctest.log");
        let cmake = root.join("bin/cmake");
        let ctest = root.join("bin/ctest");
        std::fs::create_dir_all(root.join("bin")).unwrap();
        write_tool(&cmake, &cmake_log, 0);
        write_tool(&ctest, &ctest_log, 0);

        let mut config = Config::default();
        config.paths.store_root = Some(root.join("store"));

        Harness {
            temp,
            config,
            cmake_log,
            ctest_log,
            cmake,
            ctest,
        }
    }

    fn settings() -> Settings {
        Settings {
            os: Os::Linux,
            compiler: Compiler::new(CompilerFamily::Gcc, Some(CxxStandard::Cxx20)),
            build_type: BuildType::Release,
            arch: Arch::X86_64,
        }
    }

    fn context(harness: &Harness, settings: Settings) -> BuildContext {
        let recipe = parse_recipe_from_str(RECIPE).unwrap();
        let options = kiln_builder::resolve_options(&settings, &OptionRequest::default());
        BuildContext::new(
            recipe,
            harness.temp.path().join("work"),
            settings,
            options,
            harness.temp.path().join("build"),
            harness.temp.path().join("package"),
        )
    }

    fn builder(harness: &Harness) -> Builder {
        Builder::new(harness.config.clone()).with_cmake(Cmake::with_executables(
            harness.cmake.clone(),
            harness.ctest.clone(),
            2,
        ))
    }

    fn log_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_create_runs_all_verbs_in_order() {
        let harness = harness();
        let ctx = context(&harness, settings());

        let layout = builder(&harness).create(&ctx).await.unwrap();

        let cmake_calls = log_lines(&harness.cmake_log);
        assert_eq!(cmake_calls.len(), 3, "configure, build, install");
        assert!(cmake_calls[0].contains("-DCMAKE_TOOLCHAIN_FILE="));
        assert!(cmake_calls[1].starts_with("--build"));
        assert!(cmake_calls[1].contains("--parallel 2"));
        assert!(cmake_calls[2].starts_with("--install"));

        // The test runner was invoked exactly once, verbose on failure
        let ctest_calls = log_lines(&harness.ctest_log);
        assert_eq!(ctest_calls, vec!["--output-on-failure".to_string()]);

        // Generated inputs exist
        let generators = harness.temp.path().join("build/generators");
        assert!(generators.join("dependencies.cmake").is_file());
        assert!(generators.join("toolchain.cmake").is_file());

        // Consumer metadata was published
        assert_eq!(layout.target, "corekit::corekit");
        let written =
            std::fs::read_to_string(harness.temp.path().join("package").join(LAYOUT_FILE))
                .unwrap();
        let back: PackageLayout = serde_json::from_str(&written).unwrap();
        assert_eq!(back, layout);

        // Build-integration glue travels with the package
        assert!(harness
            .temp
            .path()
            .join("package/cmake/corekit-config.cmake")
            .is_file());
    }

    #[tokio::test]
    async fn test_skip_tests_never_invokes_ctest() {
        let mut harness = harness();
        harness.config.build.skip_tests = true;
        let ctx = context(&harness, settings());

        let outcome = builder(&harness).build(&ctx).await.unwrap();

        assert!(outcome.test_report.is_none());
        assert!(log_lines(&harness.ctest_log).is_empty());
        // configure and build still ran
        assert_eq!(log_lines(&harness.cmake_log).len(), 2);
    }

    #[tokio::test]
    async fn test_failing_tests_are_fatal_but_keep_artifacts() {
        let harness = harness();
        write_tool(&harness.ctest, &harness.ctest_log, 1);
        let ctx = context(&harness, settings());

        let err = builder(&harness).build(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::TestsFailed { .. })));

        // The build tree from the prior stage is intact
        assert!(harness
            .temp
            .path()
            .join("build/generators/toolchain.cmake")
            .is_file());
    }

    #[tokio::test]
    async fn test_configure_failure_halts_lifecycle() {
        let harness = harness();
        write_tool(&harness.cmake, &harness.cmake_log, 1);
        let ctx = context(&harness, settings());

        let err = builder(&harness).build(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Tool(ToolError::ConfigureFailed { .. })
        ));
        // Only the configure invocation happened
        assert_eq!(log_lines(&harness.cmake_log).len(), 1);
        assert!(log_lines(&harness.ctest_log).is_empty());
    }

    #[tokio::test]
    async fn test_unsatisfied_pin_fails_before_any_tool_runs() {
        let harness = harness();
        std::fs::remove_dir_all(harness.temp.path().join("store/fmt")).unwrap();
        let ctx = context(&harness, settings());

        let err = builder(&harness).create(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Resolve(ResolveError::Unsatisfied { .. })
        ));
        assert!(log_lines(&harness.cmake_log).is_empty());
    }

    #[tokio::test]
    async fn test_standard_gate_fails_before_any_tool_runs() {
        let harness = harness();
        let low = Settings {
            compiler: Compiler::new(CompilerFamily::Gcc, Some(CxxStandard::Cxx17)),
            ..settings()
        };
        let ctx = context(&harness, low);

        let err = builder(&harness).build(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnsupportedStandard {
                required: 20,
                found: 17
            })
        ));
        assert!(log_lines(&harness.cmake_log).is_empty());
    }

    #[tokio::test]
    async fn test_shipped_recipe_declares_pinned_requirements() {
        let recipe_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../recipes/corekit.yaml");
        let recipe = parse_recipe(&recipe_path).await.unwrap();

        let requirements = recipe.declared_requirements();
        let runtime: Vec<_> = requirements
            .iter()
            .filter(|r| r.role == RequirementRole::Runtime)
            .collect();
        let test_only: Vec<_> = requirements
            .iter()
            .filter(|r| r.role == RequirementRole::BuildAndTest)
            .collect();

        assert_eq!(runtime.len(), 1);
        assert_eq!(runtime[0].name, "fmt");
        assert_eq!(runtime[0].version, Version::new(9, 1, 0));

        assert_eq!(test_only.len(), 1);
        assert_eq!(test_only[0].name, "gtest");
        assert_eq!(test_only[0].version, Version::new(1, 17, 0));
    }
}
