//! Build descriptor discovery
//!
//! Features:
//! - Recursive, depth-first walk in directory-listing order
//! - Detects `Dockerfile` and `Dockerfile.*` descriptors
//! - Skips `.git` and anything the ignore oracle reports as ignored
//!
//! Nested descriptors are returned as one flat sequence.

mod oracle;

pub use oracle::{GitCheckIgnore, GitignoreMatcher, IgnoreOracle};

use crate::domain::{Ecosystem, Project};
use crate::error::DiscoveryError;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tracing::debug;

/// Version-control metadata directory, never descended into
const VCS_DIR: &str = ".git";

/// Project name used when the descriptor's directory has no usable name
const FALLBACK_PROJECT_NAME: &str = "Dockerfile";

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Project>, DiscoveryError>> + Send + 'a>>;

/// Whether a file name denotes a Docker build descriptor
pub fn is_descriptor(file_name: &str) -> bool {
    file_name.starts_with(Ecosystem::Docker.descriptor_prefix())
}

/// Derive a project's display name from its descriptor
///
/// `Dockerfile.dev` is named `dev`; a bare `Dockerfile` takes the name of
/// its containing directory.
pub fn project_name(file_name: &str, directory: &Path) -> String {
    let prefix = Ecosystem::Docker.descriptor_prefix();
    match file_name.strip_prefix(prefix) {
        Some(rest) => match rest.strip_prefix('.') {
            Some(suffix) if !suffix.is_empty() => suffix.to_string(),
            _ if rest.is_empty() || rest == "." => directory
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(FALLBACK_PROJECT_NAME)
                .to_string(),
            _ => file_name.to_string(),
        },
        None => file_name.to_string(),
    }
}

/// Find every build descriptor under `directory`
pub async fn find_projects(
    directory: &Path,
    oracle: &dyn IgnoreOracle,
) -> Result<Vec<Project>, DiscoveryError> {
    walk(directory, oracle).await
}

fn walk<'a>(directory: &'a Path, oracle: &'a dyn IgnoreOracle) -> WalkFuture<'a> {
    Box::pin(async move {
        debug!(dir = %directory.display(), "scanning");
        let mut entries = tokio::fs::read_dir(directory)
            .await
            .map_err(|e| DiscoveryError::read_dir(directory, e))?;

        let mut projects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DiscoveryError::read_dir(directory, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| DiscoveryError::read_dir(entry.path(), e))?;
            // Lossy names are only for matching; paths come from the entry
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if file_type.is_file() && is_descriptor(&file_name) {
                let name = project_name(&file_name, directory);
                debug!(%name, path = %path.display(), "found descriptor");
                projects.push(Project::docker(name, path));
            } else if file_type.is_dir() {
                if file_name == VCS_DIR {
                    continue;
                }
                if oracle.is_ignored(&file_name, directory).await? {
                    continue;
                }

                projects.extend(walk(&path, oracle).await?);
            }
        }

        Ok(projects)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Oracle ignoring a fixed set of names and recording every query
    #[derive(Default)]
    struct FixedOracle {
        ignored: Vec<&'static str>,
        queried: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl IgnoreOracle for FixedOracle {
        async fn is_ignored(&self, entry: &str, _dir: &Path) -> Result<bool, DiscoveryError> {
            self.queried.lock().unwrap().push(entry.to_string());
            Ok(self.ignored.contains(&entry))
        }
    }

    fn sorted_names(projects: &[Project]) -> Vec<String> {
        let mut names: Vec<String> = projects.iter().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_project_name_suffix() {
        assert_eq!(project_name("Dockerfile.dev", Path::new("/repo")), "dev");
        assert_eq!(
            project_name("Dockerfile.prod.arm64", Path::new("/repo")),
            "prod.arm64"
        );
    }

    #[test]
    fn test_project_name_directory() {
        assert_eq!(project_name("Dockerfile", Path::new("/repo/api")), "api");
        assert_eq!(project_name("Dockerfile.", Path::new("/repo/api")), "api");
    }

    #[test]
    fn test_project_name_fallback() {
        assert_eq!(project_name("Dockerfile", Path::new("/")), "Dockerfile");
    }

    #[test]
    fn test_project_name_other_prefixed_file() {
        assert_eq!(
            project_name("Dockerfile-prod", Path::new("/repo")),
            "Dockerfile-prod"
        );
    }

    #[test]
    fn test_is_descriptor() {
        assert!(is_descriptor("Dockerfile"));
        assert!(is_descriptor("Dockerfile.dev"));
        assert!(!is_descriptor("dockerfile"));
        assert!(!is_descriptor("app.Dockerfile"));
    }

    #[tokio::test]
    async fn test_finds_deep_dockerfile() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("a").join("b").join("service");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("Dockerfile"), "FROM alpine:3.20\n").unwrap();

        let projects = find_projects(dir.path(), &FixedOracle::default())
            .await
            .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "service");
        assert_eq!(projects[0].path, deep.join("Dockerfile"));
        assert!(projects[0].sub_projects.is_empty());
    }

    #[tokio::test]
    async fn test_finds_suffixed_dockerfile() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dockerfile.dev"), "FROM node:20\n").unwrap();
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();

        let projects = find_projects(dir.path(), &FixedOracle::default())
            .await
            .unwrap();

        assert_eq!(sorted_names(&projects), vec!["dev"]);
    }

    #[tokio::test]
    async fn test_flattens_nested_descriptors() {
        let dir = TempDir::new().unwrap();
        let api = dir.path().join("api");
        fs::create_dir(&api).unwrap();
        fs::write(dir.path().join("Dockerfile.ci"), "").unwrap();
        fs::write(api.join("Dockerfile"), "").unwrap();
        fs::write(api.join("Dockerfile.test"), "").unwrap();

        let projects = find_projects(dir.path(), &FixedOracle::default())
            .await
            .unwrap();

        assert_eq!(sorted_names(&projects), vec!["api", "ci", "test"]);
        assert!(projects.iter().all(|p| p.sub_projects.is_empty()));
    }

    #[tokio::test]
    async fn test_ignored_directory_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let vendor = dir.path().join("vendor").join("nested");
        fs::create_dir_all(&vendor).unwrap();
        fs::write(dir.path().join("vendor").join("Dockerfile"), "").unwrap();
        fs::write(vendor.join("Dockerfile"), "").unwrap();

        let oracle = FixedOracle {
            ignored: vec!["vendor"],
            ..Default::default()
        };
        let projects = find_projects(dir.path(), &oracle).await.unwrap();

        assert!(projects.is_empty());
        assert_eq!(*oracle.queried.lock().unwrap(), vec!["vendor".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_directory_is_walked() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let odd = dir.path().join(OsStr::from_bytes(b"caf\xe9"));
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("Dockerfile.odd"), "").unwrap();
        fs::write(dir.path().join("Dockerfile.ok"), "").unwrap();

        let projects = find_projects(dir.path(), &FixedOracle::default())
            .await
            .unwrap();

        assert_eq!(sorted_names(&projects), vec!["odd", "ok"]);
        assert!(projects
            .iter()
            .any(|p| p.path == odd.join("Dockerfile.odd")));
    }

    #[tokio::test]
    async fn test_git_directory_never_walked() {
        let dir = TempDir::new().unwrap();
        let hooks = dir.path().join(".git").join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join("Dockerfile"), "").unwrap();

        let oracle = FixedOracle::default();
        let projects = find_projects(dir.path(), &oracle).await.unwrap();

        assert!(projects.is_empty());
        assert!(oracle.queried.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gitignore_matcher_walk() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "generated/\n").unwrap();
        for sub in ["generated", "web"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("Dockerfile"), "").unwrap();
        }

        let oracle = GitignoreMatcher::new(dir.path());
        let projects = find_projects(dir.path(), &oracle).await.unwrap();

        assert_eq!(sorted_names(&projects), vec!["web"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let missing = PathBuf::from("/nonexistent/dockup/path");
        let result = find_projects(&missing, &FixedOracle::default()).await;
        assert!(matches!(result, Err(DiscoveryError::ReadDir { .. })));
    }
}
