//! `merge` command handler.
//!
//! Settings are layered lowest to highest: built-in defaults, the catalog
//! config file, `CATMERGE_*` environment overrides, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use catmerge_core::{AppConfig, CatalogConfig};

#[derive(Debug, Default, Clone, PartialEq, Eq, clap::Args)]
pub struct MergeArgs {
    /// Directory to scan for `*.csv` exports; repeat for several
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dirs: Vec<PathBuf>,
    /// Destination for the merged catalog
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Fill empty categories from title keywords before writing
    #[arg(long)]
    pub auto_categorize: bool,
}

/// Build the effective merge configuration from the file at `config_path`,
/// the environment overrides in `app_config`, and `args`.
pub(crate) fn resolve_catalog_config(
    app_config: &AppConfig,
    config_path: &Path,
    args: &MergeArgs,
) -> anyhow::Result<CatalogConfig> {
    let mut config = catmerge_core::load_catalog_config(config_path)
        .with_context(|| format!("loading catalog config from {}", config_path.display()))?
        .with_env_overrides(app_config);

    if !args.input_dirs.is_empty() {
        config.input_dirs.clone_from(&args.input_dirs);
    }
    if let Some(output) = &args.output {
        config.output_path.clone_from(output);
    }
    if args.auto_categorize {
        config.auto_categorize = true;
    }

    config.validate()?;
    Ok(config)
}

pub(crate) fn run_merge_command(
    app_config: &AppConfig,
    config_path: &Path,
    args: &MergeArgs,
) -> anyhow::Result<()> {
    let config = resolve_catalog_config(app_config, config_path, args)?;
    tracing::debug!(?config, "resolved merge configuration");

    let report = catmerge_catalog::run_merge(&config)?;

    println!(
        "Finished processing. Files: {}. Total rows: {}. Total unique products: {}. Written to {}",
        report.stats.files_scanned,
        report.stats.rows_processed,
        report.unique_handles,
        report.output_path.display()
    );
    if report.stats.files_skipped > 0 {
        println!("Skipped {} unreadable file(s)", report.stats.files_skipped);
    }
    if report.categorized > 0 {
        println!("Auto-categorized {} product(s)", report.categorized);
    }

    Ok(())
}
