//! Pre-launch integrity audit for a catalog CSV.
//!
//! Works on both commerce-platform exports (`Image Src`, `Variant Price`,
//! `Body (HTML)`) and the merged catalog this crate writes (`Image URL`,
//! `Description`). Rows with neither handle nor title are variant rows and
//! are not audited on their own.

use std::path::Path;

use indexmap::IndexSet;

use crate::csv::{tokenize, RawRow};
use crate::error::CatalogError;

/// Bodies shorter than this on organic products are flagged.
const MIN_ORGANIC_BODY_CHARS: usize = 50;

/// URL fragments that mark a thumbnail-sized image.
const LOW_RES_MARKERS: &[&str] = &["thumbnail", "_small", "100x100"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MissingImage,
    LowResImage,
    MissingPrice,
    ThinContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditIssue {
    /// 1-based record number; the header is row 1.
    pub row: usize,
    pub product: String,
    pub kind: IssueKind,
}

impl std::fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (row, product) = (self.row, &self.product);
        match self.kind {
            IssueKind::MissingImage => {
                write!(f, "[ROW {row}] MISSING IMAGE: No valid image URL for \"{product}\"")
            }
            IssueKind::LowResImage => {
                write!(f, "[ROW {row}] QUALITY: Low-res image for \"{product}\"")
            }
            IssueKind::MissingPrice => {
                write!(f, "[ROW {row}] PRICE: Missing or zero price for \"{product}\"")
            }
            IssueKind::ThinContent => write!(
                f,
                "[ROW {row}] CONTENT: Organic product \"{product}\" missing ingredients/info"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub products_audited: usize,
    pub issues: Vec<AuditIssue>,
    /// Product ids seen more than once, in the order the repeat was found.
    pub duplicate_handles: Vec<String>,
    /// `false` when the file has no price column, in which case prices were
    /// not checked.
    pub prices_checked: bool,
}

impl AuditReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.issues.is_empty() && self.duplicate_handles.is_empty()
    }

    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.issues.len() + self.duplicate_handles.len()
    }
}

#[derive(Debug, Default)]
struct AuditLayout {
    title: Option<usize>,
    handle: Option<usize>,
    body: Option<usize>,
    product_type: Option<usize>,
    tags: Option<usize>,
    images: Vec<usize>,
    prices: Vec<usize>,
}

impl AuditLayout {
    fn resolve(header: &RawRow) -> Self {
        let names: Vec<String> = header
            .cells()
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let exact = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| names.iter().position(|n| n == c))
        };
        let containing = |needles: &[&str]| -> Vec<usize> {
            names
                .iter()
                .enumerate()
                .filter(|(_, n)| needles.iter().any(|needle| n.contains(needle)))
                .map(|(i, _)| i)
                .collect()
        };

        Self {
            title: exact(&["title"]),
            handle: exact(&["handle"]),
            body: names
                .iter()
                .position(|n| n.contains("body (html)") || n == "body")
                .or_else(|| exact(&["description", "descriptionhtml"])),
            product_type: exact(&["type", "producttype", "category"]),
            tags: exact(&["tags"]),
            images: containing(&["image src", "images/0/src", "image url", "medias/0/url"]),
            prices: containing(&["variant price", "variants/0/price"]),
        }
    }
}

fn trimmed(row: &RawRow, column: Option<usize>) -> &str {
    row.get(column).map_or("", str::trim)
}

/// Audits already-tokenized catalog rows; `rows[0]` is the header.
#[must_use]
pub fn audit_rows(rows: &[RawRow]) -> AuditReport {
    let Some((header, body)) = rows.split_first() else {
        return AuditReport::default();
    };

    let layout = AuditLayout::resolve(header);
    let mut report = AuditReport {
        prices_checked: !layout.prices.is_empty(),
        ..AuditReport::default()
    };
    let mut seen: IndexSet<String> = IndexSet::new();
    let mut duplicates: IndexSet<String> = IndexSet::new();

    for (idx, row) in body.iter().enumerate() {
        let row_number = idx + 2;
        let handle = trimmed(row, layout.handle);
        let title = trimmed(row, layout.title);

        if handle.is_empty() && title.is_empty() {
            continue;
        }

        let product_id = if handle.is_empty() { title } else { handle };
        if !seen.insert(product_id.to_owned()) {
            duplicates.insert(product_id.to_owned());
            continue;
        }

        report.products_audited += 1;
        let product = if title.is_empty() { handle } else { title };
        let mut flag = |kind: IssueKind| {
            report.issues.push(AuditIssue {
                row: row_number,
                product: product.to_owned(),
                kind,
            });
        };

        let mut has_valid_image = false;
        for &col in &layout.images {
            let src = trimmed(row, Some(col));
            if src.starts_with("http") {
                has_valid_image = true;
                if LOW_RES_MARKERS.iter().any(|m| src.contains(m)) {
                    flag(IssueKind::LowResImage);
                }
            }
        }
        if !has_valid_image {
            flag(IssueKind::MissingImage);
        }

        if !layout.prices.is_empty() {
            let has_price = layout.prices.iter().any(|&col| {
                trimmed(row, Some(col))
                    .parse::<f64>()
                    .is_ok_and(|p| p > 0.0)
            });
            if !has_price {
                flag(IssueKind::MissingPrice);
            }
        }

        let is_organic = [layout.tags, layout.product_type]
            .into_iter()
            .any(|col| trimmed(row, col).to_lowercase().contains("organic"));
        if is_organic && trimmed(row, layout.body).chars().count() < MIN_ORGANIC_BODY_CHARS {
            flag(IssueKind::ThinContent);
        }
    }

    report.duplicate_handles = duplicates.into_iter().collect();
    report
}

/// Reads and audits the catalog at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Read`] if the file cannot be read, or
/// [`CatalogError::EmptyFile`] if it has no rows.
pub fn audit_file(path: &Path) -> Result<AuditReport, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let rows = tokenize(&text);
    if rows.is_empty() {
        return Err(CatalogError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    Ok(audit_rows(&rows))
}
