//! Event handling and progress display
//!
//! The CLI is the only place events turn into output; everything upstream
//! just emits.

use kiln_events::{AppEvent, BuildEvent, GeneralEvent, ResolverEvent};

/// Renders lifecycle events as terminal lines
pub struct EventHandler {
    debug: bool,
}

impl EventHandler {
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Handle one incoming event
    pub fn handle_event(&self, event: &AppEvent) {
        match event {
            AppEvent::General(event) => self.handle_general(event),
            AppEvent::Build(event) => self.handle_build(event),
            AppEvent::Resolver(event) => Self::handle_resolver(event),
        }
    }

    fn handle_general(&self, event: &GeneralEvent) {
        match event {
            GeneralEvent::DebugLog { message } => {
                if self.debug {
                    eprintln!("debug: {message}");
                }
            }
            GeneralEvent::Warning { message } => eprintln!("warning: {message}"),
            GeneralEvent::Error { message, details } => {
                eprintln!("error: {message}");
                if let Some(details) = details {
                    eprintln!("  {details}");
                }
            }
            GeneralEvent::OperationStarted { operation } => println!("{operation}"),
            GeneralEvent::OperationCompleted { operation, success } => {
                if *success {
                    println!("{operation} done");
                } else {
                    eprintln!("{operation} failed");
                }
            }
            GeneralEvent::OperationFailed { operation, error } => {
                eprintln!("{operation} failed: {error}");
            }
        }
    }

    fn handle_build(&self, event: &BuildEvent) {
        match event {
            BuildEvent::SessionStarted {
                package, version, ..
            } => {
                println!("Building {package}/{version}");
            }
            BuildEvent::PhaseStarted { phase } => println!("  [{phase}]"),
            BuildEvent::PhaseCompleted { phase } => {
                if self.debug {
                    eprintln!("debug: phase {phase} completed");
                }
            }
            BuildEvent::CommandStarted {
                command,
                working_dir,
            } => {
                if self.debug {
                    eprintln!("debug: {command} (in {})", working_dir.display());
                }
            }
            BuildEvent::TestsSkipped => println!("  [test] skipped"),
            BuildEvent::Completed {
                package,
                version,
                path,
            } => {
                println!("Packaged {package}/{version} -> {}", path.display());
            }
        }
    }

    fn handle_resolver(event: &ResolverEvent) {
        match event {
            ResolverEvent::Resolving { count } => {
                println!("Resolving {count} requirement(s)");
            }
            ResolverEvent::Resolved {
                name,
                version,
                prefix,
            } => {
                println!("  {name}/{version} -> {}", prefix.display());
            }
        }
    }
}
