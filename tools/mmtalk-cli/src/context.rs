//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;
use mmtalk_commerce::ProductNo;
use mmtalk_data::{
    CatalogClient, FetchError, FixtureTransport, HttpRequest, HttpTransport, Response, Transport,
};

use crate::commands::SourceArgs;
use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.catalog = config.catalog.with_env_token();

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Build a catalog client for the requested source and pick the product.
    pub fn catalog(&self, source: &SourceArgs) -> Result<(CatalogClient<CatalogSource>, Option<ProductNo>)> {
        let product = source.product.map(ProductNo::new);

        let transport = if source.live {
            self.output
                .debug(&format!("Querying {}", self.config.catalog.endpoint));
            CatalogSource::Live(HttpTransport::new()?)
        } else {
            let Some(fixture) = source.fixture.as_deref() else {
                bail!("A fixture path or --live is required");
            };
            let path = self.resolve_path(fixture);
            self.output
                .debug(&format!("Reading fixture {}", path.display()));
            let transport = FixtureTransport::from_path(&path)?;
            CatalogSource::Fixture(transport)
        };

        let product = product.or_else(|| match &transport {
            CatalogSource::Fixture(fixture) => fixture.product_no(),
            CatalogSource::Live(_) => None,
        });

        let client = CatalogClient::new(transport, self.config.catalog.clone())
            .with_currency(self.config.sheet.currency);
        Ok((client, product))
    }

    /// Like [`Context::catalog`], but a product number is mandatory.
    pub fn catalog_for_product(
        &self,
        source: &SourceArgs,
    ) -> Result<(CatalogClient<CatalogSource>, ProductNo)> {
        let (client, product) = self.catalog(source)?;
        let Some(product) = product else {
            bail!("No product to load; pass --product <no>");
        };
        Ok((client, product))
    }
}

/// Fixture file or live endpoint, chosen at run time.
pub enum CatalogSource {
    Fixture(FixtureTransport),
    Live(HttpTransport),
}

#[async_trait]
impl Transport for CatalogSource {
    async fn execute(&self, request: HttpRequest) -> Result<Response, FetchError> {
        match self {
            CatalogSource::Fixture(transport) => transport.execute(request).await,
            CatalogSource::Live(transport) => transport.execute(request).await,
        }
    }
}
