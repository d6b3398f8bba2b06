//! Outdated dependency records

use super::Ecosystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag status value Docker Hub reports for non-deprecated tags
const ACTIVE_TAG_STATUS: &str = "active";

/// Dependency kind reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DependencyType {
    /// Production dependency (base images always are)
    Prod,
}

/// A published tag with its registry metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    /// Tag name (e.g., "3.11-slim")
    pub version: String,
    /// Registry's last-updated timestamp for this tag
    pub date: DateTime<Utc>,
    /// Whether the registry reports the tag as no longer active
    pub is_deprecated: bool,
}

impl TagInfo {
    /// Creates a new TagInfo from a registry tag status string
    pub fn new(version: impl Into<String>, date: DateTime<Utc>, tag_status: &str) -> Self {
        Self {
            version: version.into(),
            date,
            is_deprecated: tag_status != ACTIVE_TAG_STATUS,
        }
    }
}

/// A base image whose tag has a fresher comparable replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Image reference as written in the descriptor, without the tag
    pub name: String,
    /// Dependency kind
    #[serde(rename = "type")]
    pub dependency_type: DependencyType,
    /// Ecosystem this dependency belongs to
    pub ecosystem: Ecosystem,
    /// Tag currently referenced
    pub current: TagInfo,
    /// Freshest comparable tag
    pub latest: TagInfo,
}

impl Dependency {
    /// Creates a new production Docker dependency
    pub fn production(name: impl Into<String>, current: TagInfo, latest: TagInfo) -> Self {
        Self {
            name: name.into(),
            dependency_type: DependencyType::Prod,
            ecosystem: Ecosystem::Docker,
            current,
            latest,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {} [{}]",
            self.name, self.current.version, self.latest.version, self.ecosystem
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tag(version: &str, day: u32, status: &str) -> TagInfo {
        TagInfo::new(
            version,
            Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            status,
        )
    }

    #[test]
    fn test_tag_info_active() {
        assert!(!tag("3.11", 1, "active").is_deprecated);
    }

    #[test]
    fn test_tag_info_inactive() {
        assert!(tag("3.6", 1, "inactive").is_deprecated);
        assert!(tag("3.6", 1, "").is_deprecated);
    }

    #[test]
    fn test_dependency_production() {
        let dep = Dependency::production("python", tag("3.11", 1, "active"), tag("3.12", 2, "active"));
        assert_eq!(dep.dependency_type, DependencyType::Prod);
        assert_eq!(dep.ecosystem, Ecosystem::Docker);
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::production("python", tag("3.11", 1, "active"), tag("3.12", 2, "active"));
        assert_eq!(format!("{}", dep), "python:3.11 -> 3.12 [Docker]");
    }

    #[test]
    fn test_serde_dependency() {
        let dep = Dependency::production("python", tag("3.11", 1, "active"), tag("3.12", 2, "inactive"));
        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["type"], "PROD");
        assert_eq!(json["ecosystem"], "DOCKER");
        assert_eq!(json["latest"]["isDeprecated"], true);

        let parsed: Dependency = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, dep);
    }
}
