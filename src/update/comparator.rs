//! Freshest comparable tag selection
//!
//! Candidates are the registry's first page of tags, narrowed to those
//! sharing the current tag's variant, fidelity and leading-component
//! numeric-ness. The freshest candidate is the lexicographically greatest
//! tag name. This can misorder multi-digit components (`9` after `10`);
//! the ordering is kept because reports depend on it.

use crate::domain::TagInfo;
use crate::error::RegistryError;
use crate::registry::{DockerRegistry, TagMetadata};
use crate::update::VersionToken;
use tracing::debug;

/// Floating tags never considered as candidates
pub const EXCLUDED_TAGS: &[&str] = &["latest", "edge", "stable", "slim", "current"];

/// The current tag paired with its freshest comparable candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagComparison {
    /// Tag referenced by the descriptor
    pub current: TagInfo,
    /// Freshest comparable candidate
    pub latest: TagInfo,
}

impl TagComparison {
    /// Whether the candidate is a different tag pushed strictly later
    pub fn is_outdated(&self) -> bool {
        self.latest.version != self.current.version && self.latest.date > self.current.date
    }
}

/// Keep only candidates comparable with `current_tag`
pub fn comparable_tags<'a>(current_tag: &str, tags: &'a [TagMetadata]) -> Vec<&'a TagMetadata> {
    let current = VersionToken::parse(current_tag);

    tags.iter()
        .filter(|tag| !EXCLUDED_TAGS.contains(&tag.name.as_str()))
        .filter(|tag| VersionToken::parse(&tag.name).is_comparable_with(&current))
        .collect()
}

/// Pick the lexicographically greatest tag name
pub fn select_freshest<'a>(candidates: &[&'a TagMetadata]) -> Option<&'a TagMetadata> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted.last().copied()
}

/// Resolves the freshest comparable tag through a registry
pub struct TagComparator<'a> {
    registry: &'a dyn DockerRegistry,
}

impl<'a> TagComparator<'a> {
    /// Create a comparator backed by the given registry
    pub fn new(registry: &'a dyn DockerRegistry) -> Self {
        Self { registry }
    }

    /// Compare `current_tag` against the repository's comparable tags
    ///
    /// Returns `Ok(None)` when the registry has no tag list or no tag is
    /// comparable with the current one.
    pub async fn resolve_latest(
        &self,
        namespace: &str,
        image: &str,
        current_tag: &str,
    ) -> Result<Option<TagComparison>, RegistryError> {
        let current = self
            .registry
            .get_tag(namespace, image, current_tag)
            .await?
            .to_tag_info(current_tag);

        let Some(tags) = self.registry.list_tags(namespace, image).await? else {
            debug!(namespace, image, "registry returned no tag list");
            return Ok(None);
        };

        let candidates = comparable_tags(current_tag, &tags);
        let Some(freshest) = select_freshest(&candidates) else {
            debug!(namespace, image, current_tag, "no comparable tags");
            return Ok(None);
        };

        debug!(
            namespace,
            image,
            current_tag,
            candidate = %freshest.name,
            considered = candidates.len(),
            "selected freshest candidate"
        );

        Ok(Some(TagComparison {
            current,
            latest: freshest.to_tag_info(&freshest.name),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn meta(name: &str, day: u32) -> TagMetadata {
        TagMetadata {
            name: name.to_string(),
            last_updated: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            tag_status: "active".to_string(),
        }
    }

    struct MockRegistry {
        tags: HashMap<String, TagMetadata>,
        list: Option<Vec<TagMetadata>>,
    }

    impl MockRegistry {
        fn new(list: Option<Vec<TagMetadata>>) -> Self {
            let tags = list
                .iter()
                .flatten()
                .map(|t| (t.name.clone(), t.clone()))
                .collect();
            Self { tags, list }
        }
    }

    #[async_trait]
    impl DockerRegistry for MockRegistry {
        fn registry_name(&self) -> &'static str {
            "mock"
        }

        async fn get_tag(
            &self,
            _namespace: &str,
            image: &str,
            tag: &str,
        ) -> Result<TagMetadata, RegistryError> {
            self.tags
                .get(tag)
                .cloned()
                .ok_or_else(|| RegistryError::tag_not_found(image, "mock"))
        }

        async fn list_tags(
            &self,
            _namespace: &str,
            _image: &str,
        ) -> Result<Option<Vec<TagMetadata>>, RegistryError> {
            Ok(self.list.clone())
        }
    }

    fn names(tags: &[&TagMetadata]) -> Vec<String> {
        let mut names: Vec<String> = tags.iter().map(|t| t.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_comparable_tags_subset() {
        let tags = vec![
            meta("1.23", 1),
            meta("1.25", 2),
            meta("1.25-alpine", 3),
            meta("1.23.1", 4),
            meta("latest", 5),
        ];
        let comparable = comparable_tags("1.23", &tags);
        assert_eq!(names(&comparable), vec!["1.23", "1.25"]);
        assert_eq!(select_freshest(&comparable).unwrap().name, "1.25");
    }

    #[test]
    fn test_comparable_tags_excludes_floating_names() {
        let tags = vec![meta("stable", 1), meta("edge", 1), meta("current", 1)];
        assert!(comparable_tags("bookworm", &tags).is_empty());
    }

    #[test]
    fn test_comparable_tags_keeps_variant() {
        let tags = vec![meta("3.20-alpine", 1), meta("3.21-alpine", 2), meta("3.21", 3)];
        let comparable = comparable_tags("3.19-alpine", &tags);
        assert_eq!(names(&comparable), vec!["3.20-alpine", "3.21-alpine"]);
    }

    #[test]
    fn test_comparable_tags_separates_numeric_and_alphanumeric() {
        let tags = vec![meta("3.21", 1), meta("alpine3.21", 2)];
        let comparable = comparable_tags("3.20", &tags);
        assert_eq!(names(&comparable), vec!["3.21"]);
    }

    #[test]
    fn test_select_freshest_is_lexicographic() {
        let tags = vec![meta("10", 1), meta("9", 2), meta("8", 3)];
        let refs: Vec<&TagMetadata> = tags.iter().collect();
        assert_eq!(select_freshest(&refs).unwrap().name, "9");
    }

    #[test]
    fn test_select_freshest_empty() {
        assert!(select_freshest(&[]).is_none());
    }

    #[test]
    fn test_is_outdated_requires_newer_date() {
        let comparison = TagComparison {
            current: meta("3.21", 10).to_tag_info("3.21"),
            latest: meta("3.9", 5).to_tag_info("3.9"),
        };
        assert!(!comparison.is_outdated());
    }

    #[test]
    fn test_is_outdated_requires_different_version() {
        let comparison = TagComparison {
            current: meta("3.21", 1).to_tag_info("3.21"),
            latest: meta("3.21", 9).to_tag_info("3.21"),
        };
        assert!(!comparison.is_outdated());
    }

    #[test]
    fn test_is_outdated_equal_dates() {
        let comparison = TagComparison {
            current: meta("3.11", 3).to_tag_info("3.11"),
            latest: meta("3.12", 3).to_tag_info("3.12"),
        };
        assert!(!comparison.is_outdated());
    }

    #[tokio::test]
    async fn resolve_latest_reports_newer_tag() {
        let registry = MockRegistry::new(Some(vec![meta("3.11", 1), meta("3.12", 2)]));
        let comparison = TagComparator::new(&registry)
            .resolve_latest("library", "python", "3.11")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(comparison.current.version, "3.11");
        assert_eq!(comparison.latest.version, "3.12");
        assert!(comparison.is_outdated());
    }

    #[tokio::test]
    async fn resolve_latest_without_tag_list() {
        let mut registry = MockRegistry::new(Some(vec![meta("3.11", 1)]));
        registry.list = None;
        let comparison = TagComparator::new(&registry)
            .resolve_latest("library", "python", "3.11")
            .await
            .unwrap();
        assert!(comparison.is_none());
    }

    #[tokio::test]
    async fn resolve_latest_without_candidates() {
        let mut registry = MockRegistry::new(Some(vec![meta("3.11-slim", 1)]));
        registry.list = Some(vec![meta("latest", 2)]);
        let comparison = TagComparator::new(&registry)
            .resolve_latest("library", "python", "3.11-slim")
            .await
            .unwrap();
        assert!(comparison.is_none());
    }

    #[tokio::test]
    async fn resolve_latest_propagates_missing_current_tag() {
        let registry = MockRegistry::new(Some(vec![meta("3.12", 2)]));
        let result = TagComparator::new(&registry)
            .resolve_latest("library", "python", "3.11")
            .await;
        assert!(matches!(result, Err(RegistryError::TagNotFound { .. })));
    }
}
