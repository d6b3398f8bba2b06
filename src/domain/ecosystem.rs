//! Ecosystem tag for build descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build ecosystems known to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ecosystem {
    /// Docker ecosystem (Dockerfile, Dockerfile.*)
    Docker,
}

impl Ecosystem {
    /// Returns the filename prefix shared by every descriptor of this ecosystem
    pub fn descriptor_prefix(&self) -> &'static str {
        match self {
            Ecosystem::Docker => "Dockerfile",
        }
    }

    /// Returns the display name for this ecosystem
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Docker => "Docker",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_prefix() {
        assert_eq!(Ecosystem::Docker.descriptor_prefix(), "Dockerfile");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", Ecosystem::Docker), "Docker");
    }

    #[test]
    fn test_serde_serialization() {
        let json = serde_json::to_string(&Ecosystem::Docker).unwrap();
        assert_eq!(json, "\"DOCKER\"");
    }

    #[test]
    fn test_serde_deserialization() {
        let ecosystem: Ecosystem = serde_json::from_str("\"DOCKER\"").unwrap();
        assert_eq!(ecosystem, Ecosystem::Docker);
    }
}
