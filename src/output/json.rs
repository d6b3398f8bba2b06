//! JSON output formatter for machine processing
//!
//! Projects are serialized with the same camelCase shape the host receives
//! from `find_projects`, with their outdated dependencies attached.

use crate::domain::{Dependency, Project};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet mode drops projects without outdated images
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Summary statistics
    summary: JsonSummary,
    /// Per-project results
    projects: Vec<JsonProject<'a>>,
    /// Projects that could not be checked
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Projects checked successfully
    projects: usize,
    /// Outdated base images across all projects
    outdated: usize,
    /// Projects that failed
    failed: usize,
}

/// A project with its outdated dependencies
#[derive(Serialize)]
struct JsonProject<'a> {
    #[serde(flatten)]
    project: &'a Project,
    dependencies: &'a [Dependency],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let projects: Vec<JsonProject<'_>> = result
            .reports
            .iter()
            .filter(|report| self.verbosity != Verbosity::Quiet || report.has_outdated())
            .map(|report| JsonProject {
                project: &report.project,
                dependencies: &report.dependencies,
            })
            .collect();

        let output = JsonOutput {
            summary: JsonSummary {
                projects: result.reports.len(),
                outdated: result.total_outdated(),
                failed: result.errors.len(),
            },
            projects,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}
