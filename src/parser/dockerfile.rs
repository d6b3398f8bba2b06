//! Dockerfile `FROM` line parser
//!
//! Handles reference formats:
//! - Official image: `FROM python:3.11` (namespace `library`)
//! - Namespaced image: `FROM bitnami/redis:7.2`
//! - Untagged image: `FROM nginx` (no version to evaluate)
//!
//! Every `FROM` line is treated independently; build stages, `ARG`
//! substitution and line continuations are not interpreted.

/// Instruction introducing a base image
const FROM_INSTRUCTION: &str = "FROM";

/// Namespace Docker Hub uses for official images
pub const DEFAULT_NAMESPACE: &str = "library";

/// Floating tag that never has a version to compare
const LATEST_TAG: &str = "latest";

/// A base image reference taken from a `FROM` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Reference as written, without the tag (e.g., `python`, `bitnami/redis`)
    pub reference: String,
    /// Registry namespace
    pub namespace: String,
    /// Repository name within the namespace
    pub image: String,
    /// Tag, if one was given
    pub tag: Option<String>,
}

impl ImageReference {
    /// Parse an `image[:tag]` token
    pub fn parse(token: &str) -> Self {
        let mut parts = token.split(':');
        let reference = parts.next().unwrap_or_default();
        let tag = parts.next().filter(|t| !t.is_empty()).map(str::to_string);

        let (namespace, image) = reference
            .split_once('/')
            .unwrap_or((DEFAULT_NAMESPACE, reference));

        Self {
            reference: reference.to_string(),
            namespace: namespace.to_string(),
            image: image.to_string(),
            tag,
        }
    }

    /// The tag to evaluate, or `None` for untagged, `latest` or digest-pinned references
    pub fn versioned_tag(&self) -> Option<&str> {
        if self.reference.contains('@') {
            return None;
        }
        self.tag
            .as_deref()
            .filter(|tag| *tag != LATEST_TAG && !tag.contains('@'))
    }
}

/// Extract the image token from a `FROM` line
pub fn parse_from_line(line: &str) -> Option<ImageReference> {
    if !line.starts_with(FROM_INSTRUCTION) {
        return None;
    }

    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(FROM_INSTRUCTION) {
        return None;
    }

    tokens.next().map(ImageReference::parse)
}

/// Parse every `FROM` line of a descriptor, in file order
pub fn parse_descriptor(content: &str) -> Vec<ImageReference> {
    content.lines().filter_map(parse_from_line).collect()
}
