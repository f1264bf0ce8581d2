use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which sitemap shape a file is validated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapKind {
    Urlset,
    Index,
}

/// How processing of a single file ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Records were extracted and checked (possibly with errors)
    Validated,
    /// File was not present and was skipped with a warning
    Missing,
    /// File could not be read or was rejected before record checks
    Failed,
}

/// Per-file outcome reported as each file completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub kind: SitemapKind,
    pub status: FileStatus,
    pub records: usize,
}

/// Accumulated state of one validation run.
///
/// Owned by the orchestrator and passed by mutable reference into every
/// component; nothing else holds it.
#[derive(Debug, Default)]
pub struct ValidationRun {
    errors: Vec<String>,
    warnings: Vec<String>,
    total_urls: usize,
    seen_urls: HashSet<String>,
    files: Vec<FileSummary>,
}

impl ValidationRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Count one urlset record toward the total
    pub fn record_url(&mut self) {
        self.total_urls += 1;
    }

    /// Register a `loc` in the run-wide seen set.
    ///
    /// Returns `false` when the URL was already seen in this or any earlier
    /// file; the set is left untouched in that case.
    pub fn register_url(&mut self, loc: &str) -> bool {
        if self.seen_urls.contains(loc) {
            return false;
        }
        self.seen_urls.insert(loc.to_string());
        true
    }

    pub fn push_file(&mut self, summary: FileSummary) {
        self.files.push(summary);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn total_urls(&self) -> usize {
        self.total_urls
    }

    pub fn files(&self) -> &[FileSummary] {
        &self.files
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Process exit code: non-zero iff at least one error was recorded
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() { 1 } else { 0 }
    }

    /// Snapshot the run for reporting
    pub fn report(&self) -> RunReport {
        RunReport {
            passed: !self.has_errors(),
            total_urls: self.total_urls,
            error_count: self.errors.len(),
            warning_count: self.warnings.len(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            files: self.files.clone(),
        }
    }
}

/// Serializable summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub passed: bool,
    pub total_urls: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub files: Vec<FileSummary>,
}
