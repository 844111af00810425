//! Offline transport answering catalog queries from a JSON document.
//!
//! A fixture looks like:
//!
//! ```json
//! {
//!   "product": { "productNo": 101, "productName": "Linen Shirt", "salePrice": 34000 },
//!   "productOption": { "productNo": 101, "type": "DEFAULT", "flatOptions": [ ... ] },
//!   "products": [ { "products": [ ... ], "meta": { ... } } ],
//!   "failures": { "GetProductOption": "upstream timeout" }
//! }
//! ```
//!
//! `products` is either one listing page or an array of pages indexed by the
//! `page` variable. An operation named in `failures` answers with HTTP 500.

use crate::graphql::GraphQlRequest;
use crate::request::HttpRequest;
use crate::response::Response;
use crate::source::Transport;
use crate::FetchError;
use async_trait::async_trait;
use mmtalk_commerce::ProductNo;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fixture {
    #[serde(default)]
    product: Value,
    #[serde(default)]
    product_option: Value,
    #[serde(default)]
    products: Value,
    #[serde(default)]
    failures: HashMap<String, String>,
}

/// Serves a fixed catalog document.
#[derive(Debug, Clone, Default)]
pub struct FixtureTransport {
    fixture: Fixture,
}

impl FixtureTransport {
    pub fn from_json(value: Value) -> Result<Self, FetchError> {
        Ok(Self {
            fixture: serde_json::from_value(value)?,
        })
    }

    pub fn parse(source: &str) -> Result<Self, FetchError> {
        Ok(Self {
            fixture: serde_json::from_str(source)?,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            FetchError::RequestError(format!("failed to read fixture {}: {e}", path.display()))
        })?;
        Self::parse(&source)
    }

    /// Number of the fixture's product, when it has one.
    pub fn product_no(&self) -> Option<ProductNo> {
        self.fixture.product["productNo"].as_i64().map(ProductNo::new)
    }

    fn listing_page(&self, page: i64) -> Value {
        match &self.fixture.products {
            Value::Array(pages) => usize::try_from(page - 1)
                .ok()
                .and_then(|index| pages.get(index))
                .cloned()
                .unwrap_or(Value::Null),
            single => single.clone(),
        }
    }

    fn answer(&self, request: &GraphQlRequest) -> Value {
        match request.operation_name.as_str() {
            "GetProduct" => json!({ "data": { "product": self.fixture.product } }),
            "GetProductOption" => {
                json!({ "data": { "productOption": self.fixture.product_option } })
            }
            "GetProducts" => {
                let page = request.variables["page"].as_i64().unwrap_or(1);
                match self.listing_page(page) {
                    Value::Null => json!({
                        "data": null,
                        "errors": [{ "message": format!("page {page} not available") }]
                    }),
                    listing => json!({ "data": { "products": listing } }),
                }
            }
            other => json!({
                "data": null,
                "errors": [{ "message": format!("unknown operation {other}") }]
            }),
        }
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Response, FetchError> {
        let gql: GraphQlRequest = request.body_json()?;
        if let Some(message) = self.fixture.failures.get(&gql.operation_name) {
            return Ok(Response::new(500, HashMap::new(), message.clone().into_bytes()));
        }
        Response::json_ok(&self.answer(&gql))
    }
}
