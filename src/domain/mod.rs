//! Core domain models for dockup
//!
//! This module contains the records exchanged with the host:
//! - Ecosystem tag for Docker projects
//! - Projects discovered in the source tree
//! - Outdated dependencies and their tag information

mod dependency;
mod ecosystem;
mod project;

pub use dependency::{Dependency, DependencyType, TagInfo};
pub use ecosystem::Ecosystem;
pub use project::Project;
