//! Docker ecosystem support exposed to the host
//!
//! The host enumerates projects once with `find_projects`, then asks
//! `list_outdated_dependencies` for each project in turn.

use crate::discovery::{self, IgnoreOracle};
use crate::domain::{Dependency, Ecosystem, Project};
use crate::error::{AppError, DescriptorError, DiscoveryError};
use crate::parser::dockerfile::parse_descriptor;
use crate::registry::DockerRegistry;
use crate::update::TagComparator;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Operations the host calls on each ecosystem
#[async_trait]
pub trait EcosystemSupport: Send + Sync {
    /// Ecosystem handled by this implementation
    fn name(&self) -> Ecosystem;

    /// Find every project below `root`
    async fn find_projects(&self, root: &Path) -> Result<Vec<Project>, AppError>;

    /// Report the project's dependencies that have a fresher replacement
    async fn list_outdated_dependencies(
        &self,
        project: &Project,
    ) -> Result<Vec<Dependency>, AppError>;
}

/// Docker support: Dockerfile discovery and base image freshness
pub struct DockerEcosystem {
    registry: Box<dyn DockerRegistry>,
    oracle: Box<dyn IgnoreOracle>,
}

impl DockerEcosystem {
    /// Create the ecosystem from a registry and an ignore oracle
    pub fn new(registry: Box<dyn DockerRegistry>, oracle: Box<dyn IgnoreOracle>) -> Self {
        Self { registry, oracle }
    }
}

#[async_trait]
impl EcosystemSupport for DockerEcosystem {
    fn name(&self) -> Ecosystem {
        Ecosystem::Docker
    }

    async fn find_projects(&self, root: &Path) -> Result<Vec<Project>, AppError> {
        let root = tokio::fs::canonicalize(root)
            .await
            .map_err(|e| DiscoveryError::read_dir(root, e))?;

        Ok(discovery::find_projects(&root, self.oracle.as_ref()).await?)
    }

    /// Registry failures abort the whole descriptor; nothing gathered from
    /// earlier lines is returned.
    async fn list_outdated_dependencies(
        &self,
        project: &Project,
    ) -> Result<Vec<Dependency>, AppError> {
        let content = tokio::fs::read_to_string(&project.path)
            .await
            .map_err(|e| DescriptorError::read(&project.path, e))?;

        let comparator = TagComparator::new(self.registry.as_ref());
        let mut dependencies = Vec::new();

        for reference in parse_descriptor(&content) {
            let Some(tag) = reference.versioned_tag() else {
                debug!(image = %reference.reference, "no explicit version, skipping");
                continue;
            };

            let comparison = comparator
                .resolve_latest(&reference.namespace, &reference.image, tag)
                .await?;

            match comparison {
                Some(comparison) if comparison.is_outdated() => {
                    dependencies.push(Dependency::production(
                        reference.reference.clone(),
                        comparison.current,
                        comparison.latest,
                    ));
                }
                _ => debug!(image = %reference.reference, tag, "up to date"),
            }
        }

        Ok(dependencies)
    }
}
