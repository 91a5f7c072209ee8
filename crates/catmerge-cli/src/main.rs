mod audit;
mod merge;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::merge::MergeArgs;

#[derive(Debug, Parser)]
#[command(name = "catmerge")]
#[command(about = "Merge, inspect, and audit product catalog CSV exports")]
struct Cli {
    /// Catalog config file (overrides `CATMERGE_CONFIG_PATH`)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge every CSV in the input directories into one de-duplicated catalog (default)
    Merge(MergeArgs),
    /// Show a file's header row and how each catalog field resolves
    Headers {
        /// CSV export to inspect
        file: PathBuf,
    },
    /// Check a catalog export for missing images, prices, and duplicate handles
    Audit {
        /// Catalog CSV to audit
        file: PathBuf,
        /// Maximum number of issues to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = catmerge_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&app_config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %app_config.env, "configuration loaded");

    let config_path = cli.config.unwrap_or_else(|| app_config.config_path.clone());

    match cli.command {
        Some(Commands::Merge(args)) => merge::run_merge_command(&app_config, &config_path, &args),
        None => merge::run_merge_command(&app_config, &config_path, &MergeArgs::default()),
        Some(Commands::Headers { file }) => {
            let report = catmerge_catalog::inspect_headers(&file)?;
            print!("{report}");
            Ok(())
        }
        Some(Commands::Audit { file, limit }) => audit::run_audit_command(&file, limit),
    }
}
