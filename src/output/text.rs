//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Outdated base images grouped by project, with tag push dates
//! - Deprecated tag markers
//! - Summary of the scan

use crate::domain::{Dependency, TagInfo};
use crate::orchestrator::{OrchestratorResult, ProjectReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Date format used for tag push dates
const DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Calculate the maximum image name length for alignment
    fn max_name_length(dependencies: &[Dependency]) -> usize {
        dependencies
            .iter()
            .map(|d| d.name.len())
            .max()
            .unwrap_or(0)
    }

    fn format_tag(&self, tag: &TagInfo) -> String {
        let date = format!("({})", tag.date.format(DATE_FORMAT));
        let deprecated = if tag.is_deprecated { " [deprecated]" } else { "" };

        if self.color {
            format!(
                "{} {}{}",
                tag.version,
                date.dimmed(),
                deprecated.yellow()
            )
        } else {
            format!("{} {}{}", tag.version, date, deprecated)
        }
    }

    /// Format a single outdated image line
    fn format_dependency_line(
        &self,
        dependency: &Dependency,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let current = self.format_tag(&dependency.current);
        let latest = self.format_tag(&dependency.latest);

        if self.color {
            let name_display = format!("{:width$}", dependency.name, width = max_name_len);
            writeln!(
                writer,
                "  {} {} {} {}",
                name_display.bold(),
                current,
                "→".dimmed(),
                latest.bright_white()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {}",
                dependency.name,
                current,
                latest,
                width = max_name_len
            )
        }
    }

    /// Format one project with its outdated images
    fn format_project(&self, report: &ProjectReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if !report.has_outdated() {
            if self.verbosity == Verbosity::Verbose {
                if self.color {
                    writeln!(
                        writer,
                        "{} {}",
                        report.project.to_string().dimmed(),
                        "up to date".green()
                    )?;
                } else {
                    writeln!(writer, "{} up to date", report.project)?;
                }
            }
            return Ok(());
        }

        if self.color {
            writeln!(
                writer,
                "{} {}",
                report.project.name.cyan().bold(),
                format!("({})", report.project.path.display()).dimmed()
            )?;
        } else {
            writeln!(writer, "{}", report.project)?;
        }

        let max_name_len = Self::max_name_length(&report.dependencies);
        for dependency in &report.dependencies {
            self.format_dependency_line(dependency, max_name_len, writer)?;
        }
        writeln!(writer)
    }

    fn format_summary(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let outdated = result.total_outdated();
        let checked = result.reports.len();

        if self.color {
            writeln!(writer, "{}:", "Summary".bold())?;
            if outdated > 0 {
                writeln!(
                    writer,
                    "  {} outdated image(s) in {} project(s) checked",
                    outdated.to_string().yellow(),
                    checked
                )?;
            } else {
                writeln!(
                    writer,
                    "  {} ({} project(s) checked)",
                    "All base images are up to date".green(),
                    checked
                )?;
            }
            if !result.errors.is_empty() {
                writeln!(
                    writer,
                    "  {} project(s) failed",
                    result.errors.len().to_string().red()
                )?;
            }
        } else {
            writeln!(writer, "Summary:")?;
            if outdated > 0 {
                writeln!(
                    writer,
                    "  {} outdated image(s) in {} project(s) checked",
                    outdated, checked
                )?;
            } else {
                writeln!(
                    writer,
                    "  All base images are up to date ({} project(s) checked)",
                    checked
                )?;
            }
            if !result.errors.is_empty() {
                writeln!(writer, "  {} project(s) failed", result.errors.len())?;
            }
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for report in &result.reports {
            self.format_project(report, writer)?;
        }

        if !result.errors.is_empty() {
            if self.color {
                writeln!(writer, "{}:", "Errors".red().bold())?;
            } else {
                writeln!(writer, "Errors:")?;
            }
            for error in &result.errors {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
            writeln!(writer)?;
        }

        // In quiet mode, outdated images and errors only
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        self.format_summary(result, writer)
    }
}
