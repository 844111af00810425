//! Catalog client and the transports it runs over.

use crate::config::CatalogConfig;
use crate::graphql::{GraphQlDocument, GraphQlRequest, GET_PRODUCT, GET_PRODUCTS, GET_PRODUCT_OPTION};
use crate::model::{ProductData, ProductOptionData, ProductOptionPayload, ProductsData};
use crate::request::HttpRequest;
use crate::response::Response;
use crate::FetchError;
use async_trait::async_trait;
use mmtalk_commerce::catalog::{OptionSchema, PageMeta, ProductFeed, ProductSummary};
use mmtalk_commerce::sheet::DetailSession;
use mmtalk_commerce::{Currency, ProductNo, SheetConfig};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

/// Sends a built request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<Response, FetchError>;
}

/// Typed access to the catalog's GraphQL operations.
pub struct CatalogClient<T: Transport> {
    transport: T,
    config: CatalogConfig,
    currency: Currency,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T, config: CatalogConfig) -> Self {
        Self {
            transport,
            config,
            currency: Currency::default(),
        }
    }

    /// Set the currency catalog prices are interpreted in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn query<D: DeserializeOwned>(
        &self,
        document: &GraphQlDocument,
        variables: serde_json::Value,
    ) -> Result<D, FetchError> {
        let request = GraphQlRequest::new(document, variables);
        let http = HttpRequest::graphql(&self.config, &request)?;
        debug!(operation = document.operation_name, "catalog query");
        self.transport
            .execute(http)
            .await?
            .graphql(document.operation_name)
    }

    /// Fetch one product's summary.
    pub async fn product(&self, product_no: ProductNo) -> Result<ProductSummary, FetchError> {
        let data: ProductData = self
            .query(&GET_PRODUCT, json!({ "productNo": product_no.get() }))
            .await?;
        data.product
            .map(|product| product.into_summary(self.currency))
            .ok_or_else(|| FetchError::NotFound(format!("product {}", product_no)))
    }

    /// Fetch one product's option payload as delivered.
    pub async fn product_option(
        &self,
        product_no: ProductNo,
    ) -> Result<ProductOptionPayload, FetchError> {
        let data: ProductOptionData = self
            .query(&GET_PRODUCT_OPTION, json!({ "productNo": product_no.get() }))
            .await?;
        data.product_option
            .ok_or_else(|| FetchError::NotFound(format!("options for product {}", product_no)))
    }

    /// Fetch and normalize one product's option schema.
    pub async fn option_schema(&self, product_no: ProductNo) -> Result<OptionSchema, FetchError> {
        let payload = self.product_option(product_no).await?;
        Ok(payload.into_schema(self.currency)?)
    }

    /// Fetch one listing page.
    pub async fn products(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(PageMeta, Vec<ProductSummary>), FetchError> {
        let data: ProductsData = self
            .query(&GET_PRODUCTS, json!({ "page": page, "limit": limit }))
            .await?;
        Ok(data.products.into_page(self.currency))
    }

    /// Fetch the feed's next page and append it.
    ///
    /// Returns how many new products were added; zero once the feed is
    /// exhausted.
    pub async fn load_next_page(&self, feed: &mut ProductFeed, limit: i64) -> Result<usize, FetchError> {
        let Some(page) = feed.next_page() else {
            return Ok(0);
        };
        let (meta, products) = self.products(page, limit).await?;
        let added = feed.append_page(meta, products);
        debug!(page, added, total = feed.len(), "listing page loaded");
        Ok(added)
    }

    /// Build a detail session, fetching product and options concurrently.
    ///
    /// The product is required. An option fetch or normalization failure
    /// still yields a session, with its schema marked unavailable.
    pub async fn load_session(
        &self,
        product_no: ProductNo,
        config: SheetConfig,
    ) -> Result<DetailSession, FetchError> {
        let (product, option) =
            futures::join!(self.product(product_no), self.product_option(product_no));

        let mut session = DetailSession::new(product?, config);
        match option {
            Ok(payload) => session.load_raw_schema(payload.schema),
            Err(err) => session.mark_unavailable(err.to_string()),
        }
        info!(
            product_no = %product_no,
            schema = session.schema_state().as_str(),
            "detail session loaded"
        );
        Ok(session)
    }
}
