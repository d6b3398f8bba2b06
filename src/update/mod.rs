//! Tag freshness judgment
//!
//! This module provides:
//! - Tag decomposition into version number, fidelity and variant
//! - Comparable tag filtering and freshest candidate selection

mod comparator;
mod token;

pub use comparator::{
    comparable_tags, select_freshest, TagComparator, TagComparison, EXCLUDED_TAGS,
};
pub use token::VersionToken;
