//! Scan orchestrator for coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: discover → parse → fetch → judge
//! - Sequential registry lookups, one project at a time
//! - Error isolation per project: a failing descriptor does not stop the run

use crate::cli::CliArgs;
use crate::discovery::{GitCheckIgnore, GitignoreMatcher, IgnoreOracle};
use crate::domain::{Dependency, Project};
use crate::ecosystem::{DockerEcosystem, EcosystemSupport};
use crate::error::{AppError, ConfigError};
use crate::progress::Progress;
use crate::registry::{DockerHubAdapter, HttpClient};
use std::path::PathBuf;
use tracing::{info, warn};

/// Orchestrator for coordinating the scan workflow
pub struct Orchestrator {
    /// Directory to scan
    root: PathBuf,
    /// Ecosystem implementation driven by this host
    ecosystem: Box<dyn EcosystemSupport>,
}

/// Outdated dependencies found in one project
#[derive(Debug, Clone)]
pub struct ProjectReport {
    /// The scanned project
    pub project: Project,
    /// Base images with a fresher tag
    pub dependencies: Vec<Dependency>,
}

impl ProjectReport {
    /// Returns true if any base image is outdated
    pub fn has_outdated(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// Result of running the orchestrator
pub struct OrchestratorResult {
    /// Reports for every project that was checked successfully
    pub reports: Vec<ProjectReport>,
    /// Projects that could not be checked
    pub errors: Vec<OrchestratorError>,
}

impl OrchestratorResult {
    /// Total number of outdated base images
    pub fn total_outdated(&self) -> usize {
        self.reports.iter().map(|r| r.dependencies.len()).sum()
    }
}

/// Per-project failures recorded during a run
#[derive(Debug)]
pub enum OrchestratorError {
    /// Failed to read the descriptor
    DescriptorError { path: String, message: String },
    /// Failed to fetch tags from the registry
    RegistryError { path: String, message: String },
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::DescriptorError { path, message } => {
                write!(f, "Failed to read {}: {}", path, message)
            }
            OrchestratorError::RegistryError { path, message } => {
                write!(f, "Failed to check {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl OrchestratorError {
    fn from_app_error(project: &Project, error: AppError) -> Self {
        let path = project.path.display().to_string();
        let message = error.to_string();
        match error {
            AppError::Registry(_) => OrchestratorError::RegistryError { path, message },
            _ => OrchestratorError::DescriptorError { path, message },
        }
    }
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: &CliArgs) -> Result<Self, AppError> {
        args.validate()?;
        let root = args
            .path
            .canonicalize()
            .map_err(|e| ConfigError::InvalidPath {
                path: args.path.clone(),
                message: e.to_string(),
            })?;

        let client = HttpClient::new()?;
        let registry = DockerHubAdapter::with_base_url(client, &args.registry_url);
        let oracle: Box<dyn IgnoreOracle> = if args.git_check_ignore {
            Box::new(GitCheckIgnore)
        } else {
            Box::new(GitignoreMatcher::new(&root))
        };

        Ok(Self {
            root,
            ecosystem: Box::new(DockerEcosystem::new(Box::new(registry), oracle)),
        })
    }

    /// Create an orchestrator with a custom ecosystem (for testing)
    pub fn with_ecosystem(root: impl Into<PathBuf>, ecosystem: Box<dyn EcosystemSupport>) -> Self {
        Self {
            root: root.into(),
            ecosystem,
        }
    }

    /// Run the scan with optional progress display
    ///
    /// Discovery failures abort the run; failures while checking a project
    /// are collected and the remaining projects are still checked.
    pub async fn run(&self, show_progress: bool) -> Result<OrchestratorResult, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: Discover build descriptors
        progress.discovering();
        let projects = self.ecosystem.find_projects(&self.root).await;
        progress.clear();
        let projects = projects?;
        info!(
            count = projects.len(),
            ecosystem = %self.ecosystem.name(),
            "discovered projects"
        );

        // Step 2: Check each project's base images
        progress.checking(projects.len());
        let mut reports = Vec::new();
        let mut errors = Vec::new();

        for project in projects {
            progress.project(&project.name);
            match self.ecosystem.list_outdated_dependencies(&project).await {
                Ok(dependencies) => reports.push(ProjectReport {
                    project,
                    dependencies,
                }),
                Err(e) => {
                    warn!(path = %project.path.display(), error = %e, "project check failed");
                    errors.push(OrchestratorError::from_app_error(&project, e));
                }
            }
            progress.inc();
        }
        progress.clear();

        Ok(OrchestratorResult { reports, errors })
    }
}
