use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show errors and the final verdict
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Human,
    /// Machine-readable JSON report
    Json,
}

/// Sitemap validator for CI pipelines
#[derive(Parser, Debug, Clone)]
#[command(name = "validate-sitemaps")]
#[command(about = "Validate XML sitemaps against the Sitemap 0.9 protocol and SEO rules")]
#[command(version)]
pub struct Cli {
    /// Directory containing the sitemap files
    #[arg(help = "Directory containing the sitemap files (default: public)")]
    pub dir: Option<PathBuf>,

    /// Probe every URL with a HEAD request (same as VALIDATE_URLS=true)
    #[arg(long = "check-urls")]
    pub check_urls: bool,

    /// Liveness probe timeout in seconds
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    /// Maximum number of liveness probes in flight
    #[arg(long = "max-probes")]
    pub max_probes: Option<usize>,

    /// Report format
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
