pub mod audit;
pub mod categorize;
pub mod columns;
pub mod csv;
pub mod error;
pub mod handle;
pub mod inspect;
pub mod merge;
pub mod pipeline;
pub mod walk;
pub mod writer;

pub use audit::{audit_file, AuditIssue, AuditReport, IssueKind};
pub use columns::{ColumnLayout, Field};
pub use csv::{tokenize, RawRow};
pub use error::CatalogError;
pub use inspect::{inspect_headers, HeaderReport};
pub use merge::{merge_sources, Catalog, MergeOutcome, MergeStats};
pub use pipeline::{run_merge, MergeReport};
pub use writer::write_catalog;
