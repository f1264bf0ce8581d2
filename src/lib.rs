//! # validate-sitemaps Library
//!
//! Validates a directory of XML sitemaps against the Sitemap 0.9 protocol and
//! a set of SEO rules, with optional concurrent liveness probing of every URL.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod liveness;
pub mod loader;
pub mod output;
pub mod rules;
pub mod run;
pub mod telemetry;
pub mod validator;

pub use cli::{Cli, OutputFormat, VerbosityLevel};
pub use config::{Config, ConfigError, ConfigManager, EnvProvider, SystemEnvProvider};
pub use error::SitemapError;
pub use extractor::{SITEMAP_NAMESPACE, SitemapEntry, SitemapIndexEntry};
pub use liveness::{LivenessChecker, LivenessConfig, ProbeGroup};
pub use output::Output;
pub use rules::ValidationResult;
pub use run::{FileStatus, FileSummary, RunReport, SitemapKind, ValidationRun};
pub use telemetry::init_tracing;
pub use validator::{ProgressCallback, SitemapValidator};
