//! CLI argument parsing module for dockup

use crate::error::ConfigError;
use crate::registry::DEFAULT_REGISTRY_URL;
use clap::Parser;
use std::path::PathBuf;

/// Reports Dockerfile base images with fresher tags on Docker Hub
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dockup",
    version,
    about = "Reports stale Dockerfile base image tags"
)]
pub struct CliArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Enable verbose output (also lists up-to-date projects and debug logs)
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - outdated images only, no progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Ask `git check-ignore` per directory instead of reading .gitignore files
    #[arg(long)]
    pub git_check_ignore: bool,

    /// Registry base URL
    #[arg(long, env = "DOCKUP_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,
}

impl CliArgs {
    /// Check option values that clap cannot validate on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: self.path.clone(),
                message: "not a directory".to_string(),
            });
        }

        if !(self.registry_url.starts_with("http://") || self.registry_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidRegistryUrl {
                url: self.registry_url.clone(),
            });
        }

        Ok(())
    }

    /// Whether progress indicators should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing filter directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "dockup=debug"
        } else {
            "warn"
        }
    }
}
