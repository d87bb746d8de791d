//! CMake driver
//!
//! The four verbs kiln delegates to the external build tool: configure,
//! build, test, install. Each verb is one blocking process invocation;
//! a non-zero exit maps to the stage-specific `ToolError` carrying the
//! tool's own diagnostics.

use crate::context::BuildContext;
use crate::executor::run_command;
use kiln_errors::{Error, ToolError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Located build-tool executables plus the parallelism to use
#[derive(Debug, Clone)]
pub struct Cmake {
    cmake: PathBuf,
    ctest: PathBuf,
    jobs: usize,
}

impl Cmake {
    /// Locate cmake and ctest on PATH
    ///
    /// # Errors
    ///
    /// Returns `ToolError::ToolNotFound` when either executable is absent;
    /// this is checked before any process is spawned.
    pub fn locate(jobs: usize) -> Result<Self, Error> {
        let cmake = which::which("cmake").map_err(|_| ToolError::ToolNotFound {
            tool: "cmake".to_string(),
        })?;
        let ctest = which::which("ctest").map_err(|_| ToolError::ToolNotFound {
            tool: "ctest".to_string(),
        })?;
        Ok(Self { cmake, ctest, jobs })
    }

    /// Use explicit executables instead of a PATH lookup
    #[must_use]
    pub fn with_executables(cmake: PathBuf, ctest: PathBuf, jobs: usize) -> Self {
        Self { cmake, ctest, jobs }
    }

    /// Arguments for the configure invocation
    #[must_use]
    pub fn configure_args(ctx: &BuildContext, toolchain_file: &Path) -> Vec<String> {
        vec![
            ctx.source_dir().display().to_string(),
            format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain_file.display()),
        ]
    }

    /// Run the configure step in the build tree
    ///
    /// # Errors
    ///
    /// Returns `ToolError::ConfigureFailed` on a non-zero exit. Native
    /// configuration failures are not transient, so there is no retry.
    pub async fn configure(&self, ctx: &BuildContext, toolchain_file: &Path) -> Result<(), Error> {
        fs::create_dir_all(&ctx.build_dir).await?;

        let args = Self::configure_args(ctx, toolchain_file);
        let result = run_command(
            &self.cmake,
            &args,
            &ctx.build_dir,
            ctx.event_sender.as_ref(),
        )
        .await?;

        if !result.success {
            return Err(ToolError::ConfigureFailed {
                message: diagnostic(&result.stdout, &result.stderr),
            }
            .into());
        }

        Ok(())
    }

    /// Run the build step
    ///
    /// # Errors
    ///
    /// Returns `ToolError::BuildFailed` on a non-zero exit.
    pub async fn build(&self, ctx: &BuildContext) -> Result<(), Error> {
        let args = vec![
            "--build".to_string(),
            ".".to_string(),
            "--parallel".to_string(),
            self.jobs.to_string(),
        ];
        let result = run_command(
            &self.cmake,
            &args,
            &ctx.build_dir,
            ctx.event_sender.as_ref(),
        )
        .await?;

        if !result.success {
            return Err(ToolError::BuildFailed {
                message: diagnostic(&result.stdout, &result.stderr),
            }
            .into());
        }

        Ok(())
    }

    /// Run the test step with verbose-on-failure reporting
    ///
    /// # Errors
    ///
    /// Returns `ToolError::TestsFailed` on a non-zero exit. Build output
    /// from the previous stage remains valid even then.
    pub async fn test(&self, ctx: &BuildContext) -> Result<TestReport, Error> {
        let args = vec!["--output-on-failure".to_string()];
        let result = run_command(
            &self.ctest,
            &args,
            &ctx.build_dir,
            ctx.event_sender.as_ref(),
        )
        .await?;

        let report = TestReport::parse(&result.stdout);

        if !result.success {
            let message = match &report {
                Some(report) => format!("{}/{} tests passed", report.passed, report.total),
                None => diagnostic(&result.stdout, &result.stderr),
            };
            return Err(ToolError::TestsFailed { message }.into());
        }

        Ok(report.unwrap_or_default())
    }

    /// Run the install step into the package prefix
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InstallFailed` on a non-zero exit.
    pub async fn install(&self, ctx: &BuildContext) -> Result<(), Error> {
        fs::create_dir_all(&ctx.package_dir).await?;

        let args = vec![
            "--install".to_string(),
            ".".to_string(),
            "--prefix".to_string(),
            ctx.package_dir.display().to_string(),
        ];
        let result = run_command(
            &self.cmake,
            &args,
            &ctx.build_dir,
            ctx.event_sender.as_ref(),
        )
        .await?;

        if !result.success {
            return Err(ToolError::InstallFailed {
                message: diagnostic(&result.stdout, &result.stderr),
            }
            .into());
        }

        Ok(())
    }
}

/// Test run summary parsed from CTest output
#[derive(Debug, Clone, Default)]
pub struct TestReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl TestReport {
    /// Parse the CTest summary line: "X% tests passed, Y tests failed out of Z"
    fn parse(output: &str) -> Option<Self> {
        let line = output.lines().find(|line| line.contains("% tests passed"))?;
        let parts: Vec<&str> = line.split_whitespace().collect();

        let failed_pos = parts.iter().position(|&s| s == "failed")?;
        let out_of_pos = parts.iter().position(|&s| s == "of")?;

        let failed = if failed_pos >= 2 && parts.get(failed_pos - 1) == Some(&"tests") {
            parts.get(failed_pos - 2)?.parse().ok()?
        } else {
            parts.get(failed_pos - 1)?.parse().ok()?
        };

        let total: usize = parts.get(out_of_pos + 1)?.parse().ok()?;

        Some(Self {
            total,
            passed: total.saturating_sub(failed),
            failed,
        })
    }
}

/// Pick whichever stream actually carries the tool's diagnostics
fn diagnostic(stdout: &str, stderr: &str) -> String {
    if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}
