//! Packaging helpers
//!
//! After `cmake --install` has populated the package prefix, the
//! build-support directory travels alongside the compiled artifacts so
//! consumers receive the build-integration glue too.

use crate::context::BuildContext;
use crate::fileops::copy_directory_recursive;
use kiln_errors::{ConfigError, Error};
use kiln_events::EventEmitter;

/// Copy the recipe's build-support directory into the package root
///
/// # Errors
///
/// Returns `ConfigError::MissingExportPath` when the support directory is
/// absent from the recipe tree.
pub async fn copy_build_support(ctx: &BuildContext) -> Result<(), Error> {
    let support = &ctx.recipe.export.support;
    let src = ctx.recipe_dir.join(support);

    if !src.is_dir() {
        return Err(ConfigError::MissingExportPath {
            path: support.display().to_string(),
        }
        .into());
    }

    copy_directory_recursive(&src, &ctx.package_dir.join(support)).await?;

    ctx.emit_debug(format!(
        "copied {} into {}",
        support.display(),
        ctx.package_dir.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::parser::parse_recipe_from_str;
    use kiln_types::{OptionSet, Settings};
    use tempfile::tempdir;
    use tokio::fs;

    fn context(dir: &std::path::Path) -> BuildContext {
        let recipe = parse_recipe_from_str(
            r#"
metadata:
  name: corekit
  version: 0.1.0
  license: MIT
  description: test
package:
  target: corekit::corekit
  libraries: [corekit]
"#,
        )
        .unwrap();
        BuildContext::new(
            recipe,
            dir.join("work"),
            Settings::host(),
            OptionSet {
                shared: false,
                fpic: Some(true),
            },
            dir.join("build"),
            dir.join("package"),
        )
    }

    #[tokio::test]
    async fn test_copies_support_dir() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());
        fs::create_dir_all(temp.path().join("work/cmake"))
            .await
            .unwrap();
        fs::write(
            temp.path().join("work/cmake/corekit-config.cmake"),
            "# config",
        )
        .await
        .unwrap();

        copy_build_support(&ctx).await.unwrap();

        assert!(temp
            .path()
            .join("package/cmake/corekit-config.cmake")
            .is_file());
    }

    #[tokio::test]
    async fn test_missing_support_dir_is_config_error() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());

        let err = copy_build_support(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingExportPath { .. })
        ));
    }
}
