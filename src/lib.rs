//! dockup - Dockerfile base image freshness checker library
//!
//! This library provides the core functionality for finding Dockerfiles in
//! a source tree and reporting base images whose tag has a fresher
//! comparable tag on Docker Hub:
//! - Discovery of build descriptors honoring .gitignore rules
//! - `FROM` line parsing
//! - Docker Hub tag lookups
//! - Freshest comparable tag selection

pub mod cli;
pub mod discovery;
pub mod domain;
pub mod ecosystem;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod update;
