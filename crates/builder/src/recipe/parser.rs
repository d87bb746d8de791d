//! YAML recipe parser with validation

use super::model::Recipe;
use kiln_errors::{ConfigError, Error};
use kiln_types::PackageKind;
use std::path::Path;

/// Parse a recipe from a YAML file
///
/// # Errors
///
/// Returns an error if the file cannot be read, the YAML is invalid, or
/// the manifest fails validation.
pub async fn parse_recipe(path: &Path) -> Result<Recipe, Error> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::InvalidRecipe {
                message: format!("failed to read recipe: {e}"),
            })?;

    parse_recipe_from_str(&content)
}

/// Parse a recipe from a YAML string
///
/// # Errors
///
/// Returns an error if the YAML is invalid or the manifest fails
/// validation.
pub fn parse_recipe_from_str(content: &str) -> Result<Recipe, Error> {
    let recipe: Recipe = serde_yml::from_str(content).map_err(|e| ConfigError::InvalidRecipe {
        message: format!("failed to parse YAML: {e}"),
    })?;

    validate_manifest(&recipe)?;

    Ok(recipe)
}

/// Structural validation of a parsed manifest
fn validate_manifest(recipe: &Recipe) -> Result<(), Error> {
    if recipe.metadata.name.is_empty() {
        return Err(ConfigError::InvalidRecipe {
            message: "metadata.name cannot be empty".to_string(),
        }
        .into());
    }

    if recipe.package.target.is_empty() {
        return Err(ConfigError::InvalidRecipe {
            message: "package.target cannot be empty".to_string(),
        }
        .into());
    }

    if recipe.metadata.kind == PackageKind::Library && recipe.package.libraries.is_empty() {
        return Err(ConfigError::InvalidRecipe {
            message: "a library recipe must declare package.libraries".to_string(),
        }
        .into());
    }

    Ok(())
}
