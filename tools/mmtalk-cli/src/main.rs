//! mmtalk CLI - inspect and exercise the product option engine.
//!
//! Commands:
//! - `mmtalk options` - Show the selectors a product's option schema produces
//! - `mmtalk simulate` - Replay an intent script against a detail session
//! - `mmtalk products` - Walk the product listing feed
//! - `mmtalk config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, OptionsArgs, ProductsArgs, SimulateArgs};
use logging::LogFormat;

/// mmtalk CLI - Inspect product options and replay option sheet sessions
#[derive(Parser)]
#[command(name = "mmtalk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show selector choices for a product
    Options(OptionsArgs),

    /// Replay an intent script against a detail session
    Simulate(SimulateArgs),

    /// List products page by page
    Products(ProductsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Options(args) => commands::options::run(args, &ctx).await,
        Commands::Simulate(args) => commands::simulate::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
