//! Docker Hub tag API adapter
//!
//! Fetches tag metadata from Docker Hub.
//! API endpoints:
//! - {base}/v2/namespaces/{namespace}/repositories/{image}/tags/{tag}
//! - {base}/v2/namespaces/{namespace}/repositories/{image}/tags?page_size=100

use crate::error::RegistryError;
use crate::registry::{DockerRegistry, HttpClient, TagMetadata};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Docker Hub base URL
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.hub.docker.com";

/// Number of tags requested from the tag list endpoint (first page only)
pub const TAG_PAGE_SIZE: u32 = 100;

/// Docker Hub adapter
pub struct DockerHubAdapter {
    client: HttpClient,
    base_url: String,
}

/// Tag list response
#[derive(Debug, Deserialize)]
struct TagListResponse {
    /// Tags on this page; absent for error payloads
    results: Option<Vec<TagMetadata>>,
}

impl DockerHubAdapter {
    /// Create a new adapter against Docker Hub
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_REGISTRY_URL)
    }

    /// Create a new adapter against a custom base URL
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn repository_url(&self, namespace: &str, image: &str) -> String {
        format!(
            "{}/v2/namespaces/{}/repositories/{}/tags",
            self.base_url, namespace, image
        )
    }

    /// Build the URL for a single tag
    fn build_tag_url(&self, namespace: &str, image: &str, tag: &str) -> String {
        format!("{}/{}", self.repository_url(namespace, image), tag)
    }

    /// Build the URL for the tag list
    fn build_tags_url(&self, namespace: &str, image: &str) -> String {
        format!(
            "{}?page_size={}",
            self.repository_url(namespace, image),
            TAG_PAGE_SIZE
        )
    }
}

#[async_trait]
impl DockerRegistry for DockerHubAdapter {
    fn registry_name(&self) -> &'static str {
        "Docker Hub"
    }

    async fn get_tag(
        &self,
        namespace: &str,
        image: &str,
        tag: &str,
    ) -> Result<TagMetadata, RegistryError> {
        let url = self.build_tag_url(namespace, image, tag);
        let label = format!("{}/{}:{}", namespace, image, tag);
        debug!(%label, "fetching tag");
        self.client
            .get_json(&url, &label, self.registry_name())
            .await
    }

    async fn list_tags(
        &self,
        namespace: &str,
        image: &str,
    ) -> Result<Option<Vec<TagMetadata>>, RegistryError> {
        let url = self.build_tags_url(namespace, image);
        let label = format!("{}/{}", namespace, image);
        debug!(%label, "fetching tag list");
        let response: TagListResponse = self
            .client
            .get_json(&url, &label, self.registry_name())
            .await?;
        Ok(response.results)
    }
}
