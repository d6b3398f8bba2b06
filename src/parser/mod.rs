//! Build descriptor parsing
//!
//! Extracts base image references from Dockerfile `FROM` lines.

pub mod dockerfile;
