//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(path, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let sheet = &ctx.config.sheet;
    ctx.output.info("");
    ctx.output.info("[sheet]");
    ctx.output.kv("currency", sheet.currency.code());
    ctx.output
        .kv("max_quantity_per_line", &sheet.max_quantity_per_line.to_string());
    ctx.output.kv("required_prompt", &sheet.required_prompt);
    ctx.output.kv("dismiss.distance", &sheet.dismiss.distance.to_string());
    ctx.output.kv("dismiss.velocity", &sheet.dismiss.velocity.to_string());

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("endpoint", &catalog.endpoint);
    ctx.output.kv(
        "api_token",
        if catalog.has_token() { "(set)" } else { "(not set)" },
    );

    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = match path {
        Some(path) => ctx.resolve_path(&path),
        None => ctx.cwd.join("mmtalk.toml"),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = if config_path.extension().is_some_and(|ext| ext == "json") {
        serde_json::to_string_pretty(&CliConfig::default())?
    } else {
        generate_default_config()
    };

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}
