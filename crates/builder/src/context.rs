//! Build context threaded through every lifecycle stage
//!
//! The context is assembled once, after option resolution, and is never
//! mutated by a stage: settings and options are immutable values here, so
//! stage re-entry cannot observe half-updated state.

use crate::recipe::model::Recipe;
use kiln_events::{EventEmitter, EventSender};
use kiln_types::{OptionSet, Settings};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Everything a lifecycle stage needs to know about the build at hand
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// The parsed recipe
    pub recipe: Recipe,
    /// Directory containing the recipe and the library sources
    pub recipe_dir: PathBuf,
    /// Externally supplied build settings
    pub settings: Settings,
    /// Finalized option set
    pub options: OptionSet,
    /// Out-of-source build tree
    pub build_dir: PathBuf,
    /// Package output tree
    pub package_dir: PathBuf,
    /// Identifier for this build session
    pub session_id: String,
    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl BuildContext {
    /// Create a new build context
    #[must_use]
    pub fn new(
        recipe: Recipe,
        recipe_dir: PathBuf,
        settings: Settings,
        options: OptionSet,
        build_dir: PathBuf,
        package_dir: PathBuf,
    ) -> Self {
        Self {
            recipe,
            recipe_dir,
            settings,
            options,
            build_dir,
            package_dir,
            session_id: Uuid::new_v4().to_string(),
            event_sender: None,
        }
    }

    /// Set the event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Directory the generator writes build-tool input files into
    #[must_use]
    pub fn generators_dir(&self) -> PathBuf {
        self.build_dir.join("generators")
    }

    /// Source directory handed to the build tool
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.recipe_dir
    }
}
