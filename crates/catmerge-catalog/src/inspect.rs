use std::fmt;
use std::path::Path;

use crate::columns::{ColumnLayout, Field};
use crate::csv::tokenize;
use crate::error::CatalogError;

/// Header row of one export and how its columns resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReport {
    pub headers: Vec<String>,
    pub layout: ColumnLayout,
}

impl fmt::Display for HeaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "columns:")?;
        for (idx, name) in self.headers.iter().enumerate() {
            writeln!(f, "  {idx:>3}  {name}")?;
        }
        writeln!(f, "resolved fields:")?;
        for field in Field::ALL {
            match self.layout.column(field) {
                Some(idx) => {
                    let name = self.headers.get(idx).map_or("", String::as_str);
                    writeln!(f, "  {:<12} {idx} ({name})", field.to_string())?;
                }
                None => writeln!(f, "  {:<12} -", field.to_string())?,
            }
        }
        Ok(())
    }
}

/// Reads the header row of `path` and resolves its column layout.
///
/// # Errors
///
/// Returns [`CatalogError::Read`] if the file cannot be read, or
/// [`CatalogError::EmptyFile`] if it has no rows.
pub fn inspect_headers(path: &Path) -> Result<HeaderReport, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let header = tokenize(&text)
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::EmptyFile {
            path: path.display().to_string(),
        })?;

    Ok(HeaderReport {
        layout: ColumnLayout::resolve(&header),
        headers: header.cells().to_vec(),
    })
}
