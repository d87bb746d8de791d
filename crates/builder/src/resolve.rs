//! Dependency resolution seam
//!
//! kiln declares requirements; satisfying them is someone else's job. The
//! `DependencyResolver` trait keeps that collaborator opaque. The shipped
//! implementation resolves exact pins against a local artifact store laid
//! out `<store>/<name>/<version>/`, which is the contract the resolver
//! output must meet: a prefix directory per resolved requirement.

use async_trait::async_trait;
use kiln_errors::{Error, ResolveError};
use kiln_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use kiln_types::Requirement;
use std::path::PathBuf;

/// One resolved requirement: the pin plus the prefix it lives under
#[derive(Debug, Clone)]
pub struct ResolvedDependency {
    pub requirement: Requirement,
    pub prefix: PathBuf,
}

/// External dependency resolver contract
///
/// Resolution failures are fatal and surfaced verbatim; kiln never
/// retries them (an exact pin cannot start resolving without operator
/// intervention).
#[async_trait]
pub trait DependencyResolver: Send + Sync {
    async fn resolve(&self, requirements: &[Requirement])
        -> Result<Vec<ResolvedDependency>, Error>;
}

/// Resolver backed by a local artifact store
pub struct StoreResolver {
    root: PathBuf,
    events: Option<EventSender>,
}

impl StoreResolver {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root, events: None }
    }

    #[must_use]
    pub fn with_event_sender(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }
}

impl EventEmitter for StoreResolver {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}

#[async_trait]
impl DependencyResolver for StoreResolver {
    async fn resolve(
        &self,
        requirements: &[Requirement],
    ) -> Result<Vec<ResolvedDependency>, Error> {
        if requirements.is_empty() {
            return Ok(Vec::new());
        }

        if !self.root.is_dir() {
            return Err(ResolveError::InvalidStore {
                path: self.root.display().to_string(),
                message: "store root does not exist".to_string(),
            }
            .into());
        }

        self.emit(AppEvent::Resolver(ResolverEvent::Resolving {
            count: requirements.len(),
        }));

        let mut resolved = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let prefix = self
                .root
                .join(&requirement.name)
                .join(requirement.version.to_string());

            if !prefix.is_dir() {
                return Err(ResolveError::Unsatisfied {
                    name: requirement.name.clone(),
                    version: requirement.version.to_string(),
                }
                .into());
            }

            self.emit(AppEvent::Resolver(ResolverEvent::Resolved {
                name: requirement.name.clone(),
                version: requirement.version.clone(),
                prefix: prefix.clone(),
            }));

            resolved.push(ResolvedDependency {
                requirement: requirement.clone(),
                prefix,
            });
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_types::Version;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_resolves_present_pins() {
        let temp = tempdir().unwrap();
        let store = temp.path().join("store");
        std::fs::create_dir_all(store.join("fmt/9.1.0")).unwrap();
        std::fs::create_dir_all(store.join("gtest/1.17.0")).unwrap();

        let resolver = StoreResolver::new(store.clone());
        let requirements = vec![
            Requirement::runtime("fmt", Version::new(9, 1, 0)),
            Requirement::build_and_test("gtest", Version::new(1, 17, 0)),
        ];
        let resolved = resolver.resolve(&requirements).await.unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].prefix, store.join("fmt/9.1.0"));
        assert_eq!(resolved[1].prefix, store.join("gtest/1.17.0"));
    }

    #[tokio::test]
    async fn test_missing_pin_is_unsatisfied() {
        let temp = tempdir().unwrap();
        let store = temp.path().join("store");
        std::fs::create_dir_all(&store).unwrap();

        let resolver = StoreResolver::new(store);
        let requirements = vec![Requirement::runtime("fmt", Version::new(9, 1, 0))];
        let err = resolver.resolve(&requirements).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Resolve(ResolveError::Unsatisfied { .. })
        ));
        assert!(err.to_string().contains("fmt 9.1.0"));
    }

    #[tokio::test]
    async fn test_missing_store_is_invalid() {
        let resolver = StoreResolver::new(PathBuf::from("/nonexistent/kiln-store"));
        let requirements = vec![Requirement::runtime("fmt", Version::new(9, 1, 0))];
        let err = resolver.resolve(&requirements).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Resolve(ResolveError::InvalidStore { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_requirements_skip_store_check() {
        let resolver = StoreResolver::new(PathBuf::from("/nonexistent/kiln-store"));
        let resolved = resolver.resolve(&[]).await.unwrap();
        assert!(resolved.is_empty());
    }
}
