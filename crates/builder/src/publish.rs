//! Consumer-metadata publication
//!
//! The final lifecycle stage is pure declaration: assemble the package
//! layout from the recipe's consumer metadata, attach the propagated
//! runtime requirements, and persist it as JSON in the package root. This
//! file is the only externally visible state kiln produces.

use crate::context::BuildContext;
use kiln_errors::Error;
use kiln_types::{LayoutRequirement, PackageLayout};
use tokio::fs;

/// File name of the persisted layout inside the package root
pub const LAYOUT_FILE: &str = "layout.json";

/// Build the package layout and write it into the package root
///
/// Only runtime requirements appear here; build-and-test requirements
/// never reach consumers.
///
/// # Errors
///
/// Returns an I/O error if the package root cannot be written.
pub async fn publish_layout(ctx: &BuildContext) -> Result<PackageLayout, Error> {
    let metadata = &ctx.recipe.package;

    let layout = PackageLayout {
        builddirs: metadata.builddirs.clone(),
        target: metadata.target.clone(),
        libraries: metadata.libraries.clone(),
        requires: ctx
            .recipe
            .runtime_requirements()
            .into_iter()
            .map(|req| LayoutRequirement {
                name: req.name,
                version: req.version,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&layout)
        .map_err(|e| Error::internal(format!("layout serialization: {e}")))?;

    fs::create_dir_all(&ctx.package_dir).await?;
    fs::write(ctx.package_dir.join(LAYOUT_FILE), json).await?;

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::parser::parse_recipe_from_str;
    use kiln_types::{OptionSet, Settings, Version};
    use tempfile::tempdir;

    const RECIPE: &str = r#"
metadata:
  name: corekit
  version: 0.1.0
  license: MIT
  description: test
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

    #[tokio::test]
    async fn test_layout_contents_and_persistence() {
        let temp = tempdir().unwrap();
        let recipe = parse_recipe_from_str(RECIPE).unwrap();
        let ctx = BuildContext::new(
            recipe,
            temp.path().join("work"),
            Settings::host(),
            OptionSet {
                shared: false,
                fpic: Some(true),
            },
            temp.path().join("build"),
            temp.path().join("package"),
        );

        let layout = publish_layout(&ctx).await.unwrap();

        assert_eq!(layout.builddirs, vec!["cmake".to_string()]);
        assert_eq!(layout.target, "corekit::corekit");
        assert_eq!(layout.libraries, vec!["corekit".to_string()]);

        // The test-only requirement must never surface to consumers
        assert_eq!(layout.requires.len(), 1);
        assert_eq!(layout.requires[0].name, "fmt");
        assert_eq!(layout.requires[0].version, Version::new(9, 1, 0));

        let written = std::fs::read_to_string(temp.path().join("package").join(LAYOUT_FILE))
            .unwrap();
        let back: PackageLayout = serde_json::from_str(&written).unwrap();
        assert_eq!(back, layout);
        assert!(!written.contains("gtest"));
    }
}
