//! Application error types using thiserror
//!
//! Error hierarchy:
//! - DiscoveryError: Issues while walking the source tree
//! - DescriptorError: Issues reading a Dockerfile
//! - RegistryError: Issues with Docker Hub communication
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Project discovery related errors
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Build descriptor related errors
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Image registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while discovering projects
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Failed to list a directory
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ignore check could not be run
    #[error("failed to check whether '{entry}' is ignored in {dir}: {source}")]
    IgnoreCheck {
        entry: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to build descriptor files
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// Failed to read the descriptor
    #[error("failed to read build descriptor {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to image registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Tag or repository not found
    #[error("'{image}' not found in {registry} registry")]
    TagNotFound { image: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{image}' from {registry}: {message}")]
    NetworkError {
        image: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{image}': {message}")]
    InvalidResponse {
        image: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{image}' from {registry}")]
    Timeout { image: String, registry: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Registry URL is not http(s)
    #[error("invalid registry URL '{url}': expected an http:// or https:// URL")]
    InvalidRegistryUrl { url: String },
}

impl DiscoveryError {
    /// Creates a new ReadDir error
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a new IgnoreCheck error
    pub fn ignore_check(
        entry: impl Into<String>,
        dir: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        DiscoveryError::IgnoreCheck {
            entry: entry.into(),
            dir: dir.into(),
            source,
        }
    }
}

impl DescriptorError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DescriptorError::Read {
            path: path.into(),
            source,
        }
    }
}

impl RegistryError {
    /// Creates a new TagNotFound error
    pub fn tag_not_found(image: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::TagNotFound {
            image: image.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        image: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            image: image.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(image: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            image: image.into(),
            registry: registry.into(),
        }
    }
}
