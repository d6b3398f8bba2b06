//! Tag decomposition into version number, fidelity and variant
//!
//! `1.23-alpine` splits into the version number `1.23`, a fidelity of 2
//! (dot-separated components) and the variant `alpine`.

/// A tag split into its comparable parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken {
    /// Text before the first `-`
    pub version_number: String,
    /// Number of `.`-separated components in `version_number`
    pub version_number_fidelity: usize,
    /// Text after the first `-`, empty when there is none
    pub version_type: String,
}

impl VersionToken {
    /// Decompose a raw tag. Any string is accepted.
    pub fn parse(tag: &str) -> Self {
        let (version_number, version_type) = tag.split_once('-').unwrap_or((tag, ""));

        Self {
            version_number: version_number.to_string(),
            version_number_fidelity: version_number.split('.').count(),
            version_type: version_type.to_string(),
        }
    }

    /// Whether the leading version component is an unsigned integer
    pub fn is_numeric(&self) -> bool {
        self.version_number
            .split('.')
            .next()
            .is_some_and(|leading| leading.parse::<u64>().is_ok())
    }

    /// Whether a freshness comparison between the two tags is meaningful
    pub fn is_comparable_with(&self, other: &VersionToken) -> bool {
        self.version_type == other.version_type
            && self.version_number_fidelity == other.version_number_fidelity
            && self.is_numeric() == other.is_numeric()
    }

    /// Rebuild the tag this token was parsed from
    pub fn to_tag(&self) -> String {
        if self.version_type.is_empty() {
            self.version_number.clone()
        } else {
            format!("{}-{}", self.version_number, self.version_type)
        }
    }
}
