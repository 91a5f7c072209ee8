use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::csv::quote_field;
use crate::error::CatalogError;
use crate::merge::Catalog;

pub const OUTPUT_HEADER: &str = "Handle,Title,Vendor,Category,Description,Image URL,Score";

/// Streams `catalog` as CSV into `out`: one row per handle in catalog order,
/// text fields quoted, score bare.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_catalog_to<W: Write>(mut out: W, catalog: &Catalog) -> std::io::Result<()> {
    writeln!(out, "{OUTPUT_HEADER}")?;
    for (handle, record) in catalog.iter() {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            quote_field(handle),
            quote_field(&record.title),
            quote_field(&record.vendor),
            quote_field(&record.category),
            quote_field(&record.description),
            quote_field(&record.image_url),
            record.score
        )?;
    }
    out.flush()
}

/// Creates (or truncates) `path` and writes `catalog` to it, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns [`CatalogError::Write`] if the file cannot be created or written.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let write_err = |source: std::io::Error| CatalogError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file = File::create(path).map_err(write_err)?;
    write_catalog_to(BufWriter::new(file), catalog).map_err(write_err)
}
