//! CLI command implementations.

pub mod config;
pub mod options;
pub mod products;
pub mod simulate;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Where catalog data comes from.
#[derive(Args)]
pub struct SourceArgs {
    /// Fixture file with catalog payloads.
    #[arg(required_unless_present = "live")]
    pub fixture: Option<PathBuf>,

    /// Query the configured catalog endpoint instead of a fixture.
    #[arg(long, conflicts_with = "fixture")]
    pub live: bool,

    /// Product number (defaults to the fixture's product).
    #[arg(short, long)]
    pub product: Option<i64>,
}

/// Arguments for the options command.
#[derive(Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// First-level value to list second-level choices for.
    #[arg(short, long)]
    pub first: Option<String>,
}

/// Arguments for the simulate command.
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Intent script (TOML `[[intent]]` tables or a JSON array).
    #[arg(short, long)]
    pub script: PathBuf,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum number of pages to fetch.
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// Products per page.
    #[arg(short, long, default_value = "20")]
    pub limit: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Where to write the file (default: ./mmtalk.toml).
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
