//! Completeness scoring and the best-row-per-handle merge.
//!
//! The merge is a fold over source files: [`MergeOutcome`] is the
//! accumulator, and [`MergeOutcome::absorb_file`] consumes it and hands back
//! the updated value. Nothing outside the accumulator is touched.

use std::collections::HashSet;

use catmerge_core::{ProductRecord, ScoreWeights};
use indexmap::IndexMap;

use crate::columns::{ColumnLayout, Field};
use crate::csv::{tokenize, RawRow};
use crate::handle::HandleResolver;

/// Scores how complete a row is: category and image presence dominate, and
/// description length breaks ties between otherwise similar rows.
#[must_use]
pub fn score_row(row: &RawRow, layout: &ColumnLayout, weights: &ScoreWeights) -> u64 {
    let present = |field: Field| {
        row.field(layout, field)
            .is_some_and(|v| !v.trim().is_empty())
    };

    let mut score = 0u64;
    if present(Field::Category) {
        score = score.saturating_add(weights.category_weight);
    }
    if present(Field::ImageUrl) {
        score = score.saturating_add(weights.image_weight);
    }

    let description_len = row
        .field(layout, Field::Description)
        .map_or(0, |d| d.chars().count());
    score.saturating_add(u64::try_from(description_len).unwrap_or(u64::MAX))
}

fn record_from_row(row: &RawRow, layout: &ColumnLayout, score: u64) -> ProductRecord {
    let cell = |field: Field| row.field(layout, field).unwrap_or_default().to_owned();
    ProductRecord {
        title: cell(Field::Title),
        vendor: cell(Field::Vendor),
        category: cell(Field::Category),
        description: cell(Field::Description),
        image_url: cell(Field::ImageUrl),
        score,
    }
}

/// Best-known record per handle, in first-seen handle order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: IndexMap<String, ProductRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers `candidate` for `handle`. A new handle is always accepted; an
    /// existing one is replaced only when the candidate scores strictly
    /// higher, and even then empty candidate fields keep the old values.
    ///
    /// Returns `true` if the stored record changed.
    pub fn offer(&mut self, handle: String, candidate: ProductRecord) -> bool {
        match self.records.get_mut(&handle) {
            Some(existing) if candidate.score > existing.score => {
                *existing = candidate.or_fallback(existing);
                true
            }
            Some(_) => false,
            None => {
                self.records.insert(handle, candidate);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, handle: &str) -> Option<&ProductRecord> {
        self.records.get(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProductRecord)> {
        self.records.iter().map(|(h, r)| (h.as_str(), r))
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut ProductRecord> {
        self.records.values_mut()
    }
}

/// Run-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub files_scanned: usize,
    /// Files that were discovered but could not be read.
    pub files_skipped: usize,
    /// Data rows seen, header rows excluded.
    pub rows_processed: usize,
    /// Data rows dropped because no handle could be derived.
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub rows: usize,
    /// Distinct handles seen in this file.
    pub file_handles: usize,
    /// Catalog size after this file was merged.
    pub global_handles: usize,
}

/// Accumulator threaded through the merge fold.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub stats: MergeStats,
    pub files: Vec<FileSummary>,
}

impl MergeOutcome {
    /// Merges every data row of one CSV source into the catalog.
    ///
    /// The first row is the header. A source with no rows at all still
    /// counts as scanned.
    #[must_use]
    pub fn absorb_file(mut self, name: &str, text: &str, weights: &ScoreWeights) -> Self {
        self.stats.files_scanned += 1;

        let rows = tokenize(text);
        let Some((header, body)) = rows.split_first() else {
            tracing::debug!(file = name, "file has no rows, skipping");
            return self;
        };

        let layout = ColumnLayout::resolve(header);
        let mut resolver = HandleResolver::new();
        let mut file_handles: HashSet<String> = HashSet::new();

        for row in body {
            self.stats.rows_processed += 1;

            let Some(handle) = resolver.resolve(row, &layout) else {
                self.stats.rows_skipped += 1;
                continue;
            };

            let score = score_row(row, &layout, weights);
            file_handles.insert(handle.clone());
            self.catalog
                .offer(handle, record_from_row(row, &layout, score));
        }

        let summary = FileSummary {
            name: name.to_owned(),
            rows: body.len(),
            file_handles: file_handles.len(),
            global_handles: self.catalog.len(),
        };
        tracing::info!(
            file = name,
            rows = summary.rows,
            file_uniques = summary.file_handles,
            global_uniques = summary.global_handles,
            "merged file"
        );
        self.files.push(summary);
        self
    }

    /// Records a discovered file that could not be read.
    #[must_use]
    pub fn skip_file(mut self) -> Self {
        self.stats.files_skipped += 1;
        self
    }
}

/// Folds `(name, contents)` sources into one outcome, in iteration order.
pub fn merge_sources<I, N>(sources: I, weights: &ScoreWeights) -> MergeOutcome
where
    I: IntoIterator<Item = (N, String)>,
    N: AsRef<str>,
{
    sources
        .into_iter()
        .fold(MergeOutcome::default(), |acc, (name, text)| {
            acc.absorb_file(name.as_ref(), &text, weights)
        })
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
