//! Registry adapters for fetching image tag information
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Docker Hub tag API adapter

mod client;
mod docker_hub;

pub use client::HttpClient;
pub use docker_hub::{DockerHubAdapter, DEFAULT_REGISTRY_URL, TAG_PAGE_SIZE};

use crate::domain::TagInfo;
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Metadata the registry reports for one tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagMetadata {
    /// Tag name (absent from single-tag responses of some mirrors)
    #[serde(default)]
    pub name: String,
    /// When the tag was last pushed
    pub last_updated: DateTime<Utc>,
    /// "active" or "inactive"
    pub tag_status: String,
}

impl TagMetadata {
    /// Convert into a TagInfo carrying the given version string
    pub fn to_tag_info(&self, version: &str) -> TagInfo {
        TagInfo::new(version, self.last_updated, &self.tag_status)
    }
}

/// Read-only lookups against an image registry
#[async_trait]
pub trait DockerRegistry: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch metadata for one named tag
    async fn get_tag(
        &self,
        namespace: &str,
        image: &str,
        tag: &str,
    ) -> Result<TagMetadata, RegistryError>;

    /// Fetch the first page of tags for a repository
    ///
    /// Returns `None` when the response carries no tag list.
    async fn list_tags(
        &self,
        namespace: &str,
        image: &str,
    ) -> Result<Option<Vec<TagMetadata>>, RegistryError>;
}
