//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use mmtalk_commerce::SheetConfig;
use mmtalk_data::CatalogConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["mmtalk.toml", ".mmtalk.toml", "mmtalk.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Option sheet behavior.
    #[serde(default)]
    pub sheet: SheetConfig,

    /// Catalog endpoint.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config text as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default mmtalk.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# mmtalk option engine configuration

[sheet]
max_quantity_per_line = {max_quantity}
currency = "KRW"
required_prompt = "{prompt}"

[sheet.dismiss]
distance = 100.0
velocity = 500.0

[catalog]
endpoint = "{endpoint}"
# The API token is read from {token_var}; it can also be set here:
# api_token = "..."
"#,
        max_quantity = mmtalk_commerce::config::MAX_QUANTITY_PER_LINE,
        prompt = mmtalk_commerce::config::DEFAULT_REQUIRED_PROMPT,
        endpoint = mmtalk_data::DEFAULT_ENDPOINT,
        token_var = mmtalk_data::TOKEN_ENV_VAR,
    )
}
