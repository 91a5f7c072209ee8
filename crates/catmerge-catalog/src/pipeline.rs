use std::borrow::Cow;
use std::path::{Path, PathBuf};

use catmerge_core::CatalogConfig;

use crate::categorize::auto_categorize;
use crate::error::CatalogError;
use crate::merge::{MergeOutcome, MergeStats};
use crate::walk::discover_csv_files;
use crate::writer::write_catalog;

/// What a completed merge run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub stats: MergeStats,
    pub unique_handles: usize,
    /// Records whose category was filled in by keyword match.
    pub categorized: usize,
    pub output_path: PathBuf,
}

/// Discovers, merges, and writes the catalog described by `config`.
///
/// Unreadable input files are logged and skipped; only the final write can
/// fail the run.
///
/// # Errors
///
/// Returns [`CatalogError::Write`] if the output file cannot be written.
pub fn run_merge(config: &CatalogConfig) -> Result<MergeReport, CatalogError> {
    let files = discover_csv_files(&config.input_dirs, &config.output_path);
    tracing::info!(count = files.len(), "discovered csv files");

    let mut outcome = files
        .iter()
        .fold(MergeOutcome::default(), |acc, path| {
            absorb_path(acc, path, config)
        });

    let categorized = if config.auto_categorize {
        let filled = auto_categorize(&mut outcome.catalog);
        tracing::info!(count = filled, "auto-categorized records");
        filled
    } else {
        0
    };

    tracing::info!(
        files = outcome.stats.files_scanned,
        rows = outcome.stats.rows_processed,
        skipped_rows = outcome.stats.rows_skipped,
        unique = outcome.catalog.len(),
        "finished processing"
    );

    write_catalog(&config.output_path, &outcome.catalog)?;
    tracing::info!(path = %config.output_path.display(), "catalog written");

    Ok(MergeReport {
        stats: outcome.stats,
        unique_handles: outcome.catalog.len(),
        categorized,
        output_path: config.output_path.clone(),
    })
}

fn absorb_path(acc: MergeOutcome, path: &Path, config: &CatalogConfig) -> MergeOutcome {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    tracing::info!(file = %name, "reading");
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "could not read file, skipping");
            return acc.skip_file();
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        tracing::warn!(file = %name, "file is not valid UTF-8, invalid bytes replaced");
    }
    acc.absorb_file(&name, &text, &config.score)
}
