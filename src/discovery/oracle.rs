//! Ignore oracles consulted before descending into a directory
//!
//! - `GitignoreMatcher`: in-process `.gitignore` evaluation (default)
//! - `GitCheckIgnore`: asks `git check-ignore` once per entry

use crate::error::DiscoveryError;
use async_trait::async_trait;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{debug, warn};

/// Decides whether a directory entry is excluded from the walk
#[async_trait]
pub trait IgnoreOracle: Send + Sync {
    /// Whether `entry` inside `dir` is ignored
    async fn is_ignored(&self, entry: &str, dir: &Path) -> Result<bool, DiscoveryError>;
}

/// Runs `git check-ignore -q <entry>` with `dir` as working directory
///
/// Exit status 0 means ignored; any other status means not ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCheckIgnore;

#[async_trait]
impl IgnoreOracle for GitCheckIgnore {
    async fn is_ignored(&self, entry: &str, dir: &Path) -> Result<bool, DiscoveryError> {
        let status = Command::new("git")
            .args(["check-ignore", "-q", entry])
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| DiscoveryError::ignore_check(entry, dir, e))?;

        Ok(status.success())
    }
}

/// Evaluates `.gitignore` files in process
///
/// Each directory's `.gitignore` is loaded the first time an entry of that
/// directory is checked and kept for the rest of the run. Deeper files take
/// precedence over shallower ones, then `.git/info/exclude`, then the
/// user's global excludes file.
pub struct GitignoreMatcher {
    /// Top of the repository (or the walk root outside a repository)
    top: PathBuf,
    /// Repository-wide excludes, lowest precedence first
    fallbacks: Vec<Gitignore>,
    /// Per-directory `.gitignore` matchers
    loaded: Mutex<HashMap<PathBuf, Option<Arc<Gitignore>>>>,
}

impl GitignoreMatcher {
    /// Create a matcher for a walk starting at `root`
    pub fn new(root: &Path) -> Self {
        let top = root
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .unwrap_or(root)
            .to_path_buf();

        let mut fallbacks = Vec::new();
        let (global, err) = Gitignore::global();
        if let Some(err) = err {
            warn!(error = %err, "failed to load global gitignore");
        }
        if !global.is_empty() {
            fallbacks.push(global);
        }
        let exclude = top.join(".git").join("info").join("exclude");
        if let Some(matcher) = build_matcher(&top, &exclude) {
            fallbacks.push(matcher);
        }

        Self {
            top,
            fallbacks,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// `.gitignore` matcher for `dir`, loading it on first use
    fn matcher_for(&self, dir: &Path) -> Option<Arc<Gitignore>> {
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());
        loaded
            .entry(dir.to_path_buf())
            .or_insert_with(|| build_matcher(dir, &dir.join(".gitignore")).map(Arc::new))
            .clone()
    }

    /// Evaluate `path` against every applicable ignore file
    fn matched(&self, path: &Path, dir: &Path) -> bool {
        let scoped = dir
            .ancestors()
            .take_while(|ancestor| ancestor.starts_with(&self.top))
            .filter_map(|ancestor| self.matcher_for(ancestor));

        for matcher in scoped {
            match matcher.matched(path, true) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }

        self.fallbacks
            .iter()
            .rev()
            .map(|matcher| matcher.matched(path, true))
            .find(|m| !m.is_none())
            .is_some_and(|m| m.is_ignore())
    }
}

#[async_trait]
impl IgnoreOracle for GitignoreMatcher {
    async fn is_ignored(&self, entry: &str, dir: &Path) -> Result<bool, DiscoveryError> {
        let ignored = self.matched(&dir.join(entry), dir);
        if ignored {
            debug!(entry, dir = %dir.display(), "ignored by gitignore");
        }
        Ok(ignored)
    }
}

/// Build a matcher rooted at `root` from one ignore file, if it exists
fn build_matcher(root: &Path, file: &Path) -> Option<Gitignore> {
    if !file.is_file() {
        return None;
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(file) {
        warn!(file = %file.display(), error = %err, "failed to read ignore file");
    }

    match builder.build() {
        Ok(matcher) if !matcher.is_empty() => Some(matcher),
        Ok(_) => None,
        Err(err) => {
            warn!(file = %file.display(), error = %err, "invalid ignore file");
            None
        }
    }
}
