//! Sitemap validation engine
//!
//! Drives the configured files through loading, extraction and the rule set:
//! - **urlset files** in configured order, sharing one run-wide seen-URL set
//!   so duplicates are caught across files
//! - **the index file** last, checking that every referenced sitemap exists
//! - **liveness probes** dispatched during the urlset pass and joined before
//!   the run is handed back
//!
//! All findings land on the [`ValidationRun`]; nothing here returns an error
//! for a rule violation.

use std::path::Path;
use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info};

use crate::config::SitemapsConfig;
use crate::extractor::{
    SITEMAP_NAMESPACE, extract_index_entries, extract_url_entries, has_google_news,
    has_sitemapindex_namespace, has_urlset_element, has_urlset_namespace, has_xml_declaration,
};
use crate::liveness::{LivenessChecker, ProbeGroup};
use crate::loader::{LoadOutcome, load_sitemap};
use crate::rules::{
    ValidationResult, validate_changefreq, validate_date, validate_priority, validate_url,
};
use crate::run::{FileStatus, FileSummary, SitemapKind, ValidationRun};

/// Progress callback invoked as each file completes
pub type ProgressCallback = Arc<dyn Fn(&FileSummary) + Send + Sync>;

/// Validation engine for one sitemap directory
pub struct SitemapValidator {
    config: SitemapsConfig,
    liveness: Option<LivenessChecker>,
    progress_callback: Option<ProgressCallback>,
}

impl SitemapValidator {
    /// Create a validator with liveness probing disabled
    pub fn new(config: SitemapsConfig) -> Self {
        Self {
            config,
            liveness: None,
            progress_callback: None,
        }
    }

    /// Enable liveness probing with the given checker
    pub fn with_liveness(mut self, checker: LivenessChecker) -> Self {
        self.liveness = Some(checker);
        self
    }

    /// Report each finished file to `callback`
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn liveness_enabled(&self) -> bool {
        self.liveness.is_some()
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Validate every configured file and wait for outstanding probes.
    ///
    /// A missing directory is not special: every file in it is simply not
    /// generated yet and is reported as a missing-file warning.
    pub async fn run(&self) -> ValidationRun {
        let mut run = ValidationRun::new();
        let mut probes = self.liveness.clone().map(ProbeGroup::new);

        for name in &self.config.urlset_files {
            let summary = match load_sitemap(&self.config.directory, name, &mut run) {
                LoadOutcome::Loaded(content) => {
                    self.validate_urlset(&mut run, name, &content, probes.as_mut())
                }
                outcome => unloaded_summary(name, SitemapKind::Urlset, &outcome),
            };
            self.finish_file(&mut run, summary);
        }

        let index_name = &self.config.index_file;
        let summary = match load_sitemap(&self.config.directory, index_name, &mut run) {
            LoadOutcome::Loaded(content) => self.validate_index(&mut run, index_name, &content),
            outcome => unloaded_summary(index_name, SitemapKind::Index, &outcome),
        };
        self.finish_file(&mut run, summary);

        if let Some(probes) = probes {
            info!(probes = probes.len(), "Waiting for liveness probes");
            probes.join(&mut run).await;
        }

        run
    }

    fn finish_file(&self, run: &mut ValidationRun, summary: FileSummary) {
        info!(
            file = %summary.name,
            status = ?summary.status,
            records = summary.records,
            "Finished sitemap"
        );
        if let Some(ref callback) = self.progress_callback {
            callback(&summary);
        }
        run.push_file(summary);
    }

    /// Validate the content of one urlset file.
    ///
    /// When `probes` is given, a liveness probe is dispatched for the first
    /// occurrence of every valid URL.
    pub fn validate_urlset(
        &self,
        run: &mut ValidationRun,
        name: &str,
        content: &str,
        mut probes: Option<&mut ProbeGroup>,
    ) -> FileSummary {
        if !has_xml_declaration(content) {
            run.error(format!(
                "{}: Not a valid XML document (missing XML declaration)",
                name
            ));
            return failed_summary(name, SitemapKind::Urlset);
        }

        let entries = extract_url_entries(content);

        if entries.is_empty() && !has_urlset_element(content) {
            run.error(format!(
                "{}: Invalid sitemap structure (no <urlset> element found)",
                name
            ));
            return failed_summary(name, SitemapKind::Urlset);
        }

        if !has_urlset_namespace(content) {
            run.error(format!(
                "{}: Root element must be <urlset> declaring xmlns=\"{}\"",
                name, SITEMAP_NAMESPACE
            ));
            return failed_summary(name, SitemapKind::Urlset);
        }

        if has_google_news(content) {
            run.error(format!(
                "{}: Google News sitemap extensions are not allowed",
                name
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            let context = format!("{} [url #{}]", name, i + 1);
            debug!(%context, loc = ?entry.loc, "Validating entry");
            run.record_url();

            let result = validate_url(entry.loc.as_deref(), &context);
            let (ValidationResult::Valid, Some(loc)) = (&result, entry.loc.as_deref()) else {
                record_loc_error(run, &context, entry.loc.as_deref(), &result);
                continue;
            };

            let first_occurrence = run.register_url(loc);
            if !first_occurrence {
                run.error(format!("{}: Duplicate URL: {}", context, loc));
            }

            let field_results = [
                validate_date(entry.lastmod.as_deref()),
                validate_changefreq(entry.changefreq.as_deref()),
                validate_priority(entry.priority.as_deref()),
            ];
            for message in field_results.iter().filter_map(ValidationResult::error) {
                run.error(format!("{}: {}", context, message));
            }

            if first_occurrence && let Some(group) = probes.as_mut() {
                debug!(url = %loc, "Dispatching liveness probe");
                group.spawn(loc.to_string());
            }
        }

        FileSummary {
            name: name.to_string(),
            kind: SitemapKind::Urlset,
            status: FileStatus::Validated,
            records: entries.len(),
        }
    }

    /// Validate the content of the sitemap index file
    pub fn validate_index(&self, run: &mut ValidationRun, name: &str, content: &str) -> FileSummary {
        if !has_xml_declaration(content) {
            run.error(format!(
                "{}: Not a valid XML document (missing XML declaration)",
                name
            ));
            return failed_summary(name, SitemapKind::Index);
        }

        if !has_sitemapindex_namespace(content) {
            run.error(format!(
                "{}: Root element must be <sitemapindex> declaring xmlns=\"{}\"",
                name, SITEMAP_NAMESPACE
            ));
            return failed_summary(name, SitemapKind::Index);
        }

        let entries = extract_index_entries(content);

        for (i, entry) in entries.iter().enumerate() {
            let context = format!("{} [sitemap #{}]", name, i + 1);

            let result = validate_url(entry.loc.as_deref(), &context);
            let (ValidationResult::Valid, Some(loc)) = (&result, entry.loc.as_deref()) else {
                record_loc_error(run, &context, entry.loc.as_deref(), &result);
                continue;
            };

            if let Some(message) = validate_date(entry.lastmod.as_deref()).error() {
                run.error(format!("{}: {}", context, message));
            }

            match referenced_file_name(loc) {
                Some(file_name) => {
                    if !self.config.directory.join(&file_name).exists() {
                        run.error(format!(
                            "{}: Referenced sitemap file does not exist: {}",
                            context, file_name
                        ));
                    }
                }
                None => run.error(format!(
                    "{}: Cannot derive sitemap filename from {}",
                    context, loc
                )),
            }
        }

        FileSummary {
            name: name.to_string(),
            kind: SitemapKind::Index,
            status: FileStatus::Validated,
            records: entries.len(),
        }
    }
}

/// Record a `<loc>` violation; the "URL is required" message already names
/// its record and is not prefixed again.
fn record_loc_error(
    run: &mut ValidationRun,
    context: &str,
    loc: Option<&str>,
    result: &ValidationResult,
) {
    let Some(message) = result.error() else {
        return;
    };
    match loc {
        Some(loc) if !loc.is_empty() => run.error(format!("{}: {}", context, message)),
        _ => run.error(message),
    }
}

/// Last path segment of a sitemap URL, e.g. `vehicle-sitemap.xml`
pub fn referenced_file_name(loc: &str) -> Option<String> {
    let url = Url::parse(loc).ok()?;
    let name = url.path_segments()?.next_back()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn failed_summary(name: &str, kind: SitemapKind) -> FileSummary {
    FileSummary {
        name: name.to_string(),
        kind,
        status: FileStatus::Failed,
        records: 0,
    }
}

fn unloaded_summary(name: &str, kind: SitemapKind, outcome: &LoadOutcome) -> FileSummary {
    let status = match outcome {
        LoadOutcome::Missing => FileStatus::Missing,
        _ => FileStatus::Failed,
    };
    FileSummary {
        name: name.to_string(),
        kind,
        status,
        records: 0,
    }
}
