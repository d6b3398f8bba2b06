//! Projects discovered in the source tree

use super::Ecosystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A build descriptor found during discovery
///
/// Discovery flattens nested descriptors into one sequence, so
/// `sub_projects` is always empty for projects it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Display name (Dockerfile suffix or containing directory name)
    pub name: String,
    /// Path to the descriptor file
    pub path: PathBuf,
    /// Ecosystem this project belongs to
    pub ecosystem: Ecosystem,
    /// Nested projects
    pub sub_projects: Vec<Project>,
}

impl Project {
    /// Creates a new Docker project with no sub-projects
    pub fn docker(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ecosystem: Ecosystem::Docker,
            sub_projects: Vec::new(),
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}
