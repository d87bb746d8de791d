//! Top-level lifecycle driver
//!
//! `Builder` runs the stages in their fixed order on behalf of the
//! driving process: validate, resolve requirements, generate build-tool
//! inputs, configure, build, test-or-skip, and for `create` also install
//! and publish. Every stage either completes or halts the lifecycle with
//! a fatal error; there is no retry and no partial recovery.

use crate::cmake::{Cmake, TestReport};
use crate::context::BuildContext;
use crate::generate::generate_inputs;
use crate::lifecycle::Lifecycle;
use crate::package::copy_build_support;
use crate::publish::publish_layout;
use crate::resolve::{DependencyResolver, StoreResolver};
use kiln_config::Config;
use kiln_errors::Error;
use kiln_events::{AppEvent, BuildEvent, EventEmitter};
use kiln_types::PackageLayout;

/// Result of a build run (through the test stage)
#[derive(Debug)]
pub struct BuildOutcome {
    /// Present when the test stage actually ran
    pub test_report: Option<TestReport>,
}

/// Drives the recipe lifecycle
pub struct Builder {
    config: Config,
    resolver: Box<dyn DependencyResolver>,
    cmake: Option<Cmake>,
}

impl Builder {
    /// Create a builder resolving dependencies from the configured store
    #[must_use]
    pub fn new(config: Config) -> Self {
        let resolver = StoreResolver::new(config.paths.effective_store_root());
        Self {
            config,
            resolver: Box::new(resolver),
            cmake: None,
        }
    }

    /// Replace the dependency resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn DependencyResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use explicit build-tool executables instead of a PATH lookup
    #[must_use]
    pub fn with_cmake(mut self, cmake: Cmake) -> Self {
        self.cmake = Some(cmake);
        self
    }

    fn cmake(&self) -> Result<Cmake, Error> {
        match &self.cmake {
            Some(cmake) => Ok(cmake.clone()),
            None => Cmake::locate(self.config.build.effective_jobs()),
        }
    }

    /// Run the lifecycle through the test stage
    ///
    /// # Errors
    ///
    /// Fatal on the first failing stage; see the crate error taxonomy.
    pub async fn build(&self, ctx: &BuildContext) -> Result<BuildOutcome, Error> {
        let cmake = self.cmake()?;
        let mut lifecycle = Lifecycle::new();
        let test_report = self.run_to_tested(ctx, &cmake, &mut lifecycle).await?;
        lifecycle.finish()?;
        Ok(BuildOutcome { test_report })
    }

    /// Run the full lifecycle: build, install, publish
    ///
    /// # Errors
    ///
    /// Fatal on the first failing stage; see the crate error taxonomy.
    pub async fn create(&self, ctx: &BuildContext) -> Result<PackageLayout, Error> {
        let cmake = self.cmake()?;
        let mut lifecycle = Lifecycle::new();
        self.run_to_tested(ctx, &cmake, &mut lifecycle).await?;

        lifecycle.ensure_installable()?;
        ctx.emit(AppEvent::Build(BuildEvent::PhaseStarted {
            phase: "install".to_string(),
        }));
        cmake.install(ctx).await?;
        copy_build_support(ctx).await?;

        let layout = publish_layout(ctx).await?;
        lifecycle.finish()?;

        ctx.emit(AppEvent::Build(BuildEvent::Completed {
            package: ctx.recipe.metadata.name.clone(),
            version: ctx.recipe.metadata.version.clone(),
            path: ctx.package_dir.clone(),
        }));

        Ok(layout)
    }

    /// Validate, resolve, generate, configure, build, test-or-skip
    async fn run_to_tested(
        &self,
        ctx: &BuildContext,
        cmake: &Cmake,
        lifecycle: &mut Lifecycle,
    ) -> Result<Option<TestReport>, Error> {
        // The standard gate runs before any external process
        ctx.recipe.validate(&ctx.settings)?;

        ctx.emit(AppEvent::Build(BuildEvent::SessionStarted {
            session_id: ctx.session_id.clone(),
            package: ctx.recipe.metadata.name.clone(),
            version: ctx.recipe.metadata.version.clone(),
        }));

        let resolved = self
            .resolver
            .resolve(&ctx.recipe.declared_requirements())
            .await?;

        let inputs = generate_inputs(ctx, &resolved, self.config.generator.order).await?;

        ctx.emit(AppEvent::Build(BuildEvent::PhaseStarted {
            phase: "configure".to_string(),
        }));
        lifecycle.begin_configure()?;
        cmake.configure(ctx, &inputs.toolchain_file).await?;
        lifecycle.mark_configured()?;

        ctx.emit(AppEvent::Build(BuildEvent::PhaseStarted {
            phase: "build".to_string(),
        }));
        lifecycle.begin_build()?;
        cmake.build(ctx).await?;
        lifecycle.mark_built()?;

        lifecycle.begin_test()?;
        let test_report = if self.config.build.skip_tests {
            ctx.emit(AppEvent::Build(BuildEvent::TestsSkipped));
            None
        } else {
            ctx.emit(AppEvent::Build(BuildEvent::PhaseStarted {
                phase: "test".to_string(),
            }));
            Some(cmake.test(ctx).await?)
        };
        lifecycle.mark_tested_or_skipped()?;

        Ok(test_report)
    }
}
