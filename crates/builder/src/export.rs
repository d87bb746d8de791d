//! Source export stage
//!
//! Copies the recipe's declared source classes into an export tree so the
//! recipe is self-contained outside its original working copy. Re-running
//! an export over identical content is a no-op in observable effect.

use crate::fileops::copy_directory_recursive;
use crate::recipe::model::Recipe;
use kiln_errors::{ConfigError, Error};
use kiln_events::{EventEmitter, EventSender};
use std::path::Path;
use tokio::fs;

/// Export the recipe's declared sources from `recipe_dir` into `dest`
///
/// # Errors
///
/// Returns `ConfigError::MissingExportPath` when a declared class does not
/// exist in `recipe_dir` - the recipe is malformed, not the invocation.
pub async fn export_sources(
    recipe: &Recipe,
    recipe_dir: &Path,
    dest: &Path,
    events: Option<&EventSender>,
) -> Result<(), Error> {
    let manifest = &recipe.export;

    // Fail on the first missing class before copying anything
    for class in [
        &manifest.script,
        &manifest.support,
        &manifest.include,
        &manifest.sources,
    ] {
        if !recipe_dir.join(class).exists() {
            return Err(ConfigError::MissingExportPath {
                path: class.display().to_string(),
            }
            .into());
        }
    }

    fs::create_dir_all(dest).await?;

    fs::copy(
        recipe_dir.join(&manifest.script),
        dest.join(&manifest.script),
    )
    .await?;

    for dir in [&manifest.support, &manifest.include, &manifest.sources] {
        copy_directory_recursive(&recipe_dir.join(dir), &dest.join(dir)).await?;
    }

    if let Some(sender) = events {
        sender.emit_debug(format!(
            "exported {} to {}",
            recipe.metadata,
            dest.display()
        ));
    }

    Ok(())
}
