//! Report formatting
//!
//! Human-readable and JSON renderings of a finished run, plus the banner and
//! per-file lines printed while validation is in progress.

use std::path::Path;

use crate::cli::{OutputFormat, VerbosityLevel};
use crate::error::Result;
use crate::run::{FileStatus, FileSummary, RunReport, SitemapKind};

/// Output formatter for validation reports
pub struct Output {
    verbosity: VerbosityLevel,
    format: OutputFormat,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel, format: OutputFormat) -> Self {
        Self {
            verbosity,
            format,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Formatter that never emits ANSI escapes
    pub fn plain(verbosity: VerbosityLevel, format: OutputFormat) -> Self {
        Self {
            verbosity,
            format,
            show_colors: false,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    /// Whether the banner and per-file lines should be printed
    pub fn shows_progress(&self) -> bool {
        self.format == OutputFormat::Human && self.verbosity > VerbosityLevel::Quiet
    }

    pub fn format_banner(&self, directory: &Path, liveness_enabled: bool) -> String {
        format!(
            "Validating sitemaps in {}\nURL liveness checks: {}\n",
            directory.display(),
            if liveness_enabled { "enabled" } else { "disabled" }
        )
    }

    pub fn format_file_line(&self, summary: &FileSummary) -> String {
        match summary.status {
            FileStatus::Validated => {
                let unit = match summary.kind {
                    SitemapKind::Urlset => "URL",
                    SitemapKind::Index => "sitemap",
                };
                format!(
                    "{} {}: {} {}{}",
                    self.colorize("✓", "32"),
                    summary.name,
                    summary.records,
                    unit,
                    if summary.records == 1 { "" } else { "s" }
                )
            }
            FileStatus::Missing => format!(
                "{} {}: skipped (missing)",
                self.colorize("-", "36"),
                summary.name
            ),
            FileStatus::Failed => format!("{} {}: failed", self.colorize("✗", "31"), summary.name),
        }
    }

    /// Render the final report in the configured format
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &RunReport) -> String {
        let mut output = String::new();

        if self.verbosity > VerbosityLevel::Quiet {
            output.push_str("\nValidation Summary:\n");
            output.push_str(&format!("  Total URLs validated: {}\n", report.total_urls));
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Errors:", "31"),
                report.error_count
            ));
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Warnings:", "33"),
                report.warning_count
            ));
        }

        if !report.errors.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("Errors:", "31")));
            for (i, error) in report.errors.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, error));
            }
        }

        if !report.warnings.is_empty() && self.verbosity > VerbosityLevel::Quiet {
            output.push_str(&format!("\n{}\n", self.colorize("Warnings:", "33")));
            for (i, warning) in report.warnings.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, warning));
            }
        }

        output.push('\n');
        if report.passed {
            output.push_str(&self.colorize("✅ All sitemaps are valid", "32"));
        } else {
            output.push_str(&self.colorize("❌ Sitemap validation failed", "31"));
        }
        output.push('\n');

        output
    }
}
