use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::run::ValidationRun;

/// Result of trying to read one sitemap file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(String),
    /// Not generated yet; a warning has been recorded
    Missing,
    /// Present but unreadable; an error has been recorded
    Failed,
}

/// Read `dir/name`, recording a warning for a missing file and an error for
/// any other read failure.
///
/// Reads are blocking: sitemap files are small and local.
pub fn load_sitemap(dir: &Path, name: &str, run: &mut ValidationRun) -> LoadOutcome {
    let path = dir.join(name);

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            debug!(file = %path.display(), bytes = content.len(), "Loaded sitemap");
            LoadOutcome::Loaded(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            run.warning(format!("{}: File does not exist (skipped)", name));
            LoadOutcome::Missing
        }
        Err(e) => {
            run.error(format!("{}: Failed to read file: {}", name, e));
            LoadOutcome::Failed
        }
    }
}
