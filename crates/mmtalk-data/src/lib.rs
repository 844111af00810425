//! Catalog access for the mmtalk option engine.
//!
//! Talks to the mmtalk GraphQL catalog and turns its payloads into the
//! domain types of `mmtalk-commerce`. Requests go through a [`Transport`]:
//! [`HttpTransport`] for the live endpoint, [`FixtureTransport`] for a JSON
//! document on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use mmtalk_data::{CatalogClient, CatalogConfig, HttpTransport};
//! use mmtalk_commerce::{ProductNo, SheetConfig};
//!
//! let client = CatalogClient::new(HttpTransport::new()?, CatalogConfig::default().with_env_token());
//!
//! // Product and options are fetched concurrently
//! let mut session = client.load_session(ProductNo::new(101), SheetConfig::default()).await?;
//! session.open_sheet();
//! ```

mod config;
mod error;
mod fixture;
mod graphql;
mod http;
mod model;
mod request;
mod response;
mod source;

pub use config::{CatalogConfig, DEFAULT_ENDPOINT, TOKEN_ENV_VAR};
pub use error::FetchError;
pub use fixture::FixtureTransport;
pub use graphql::{
    GraphQlDocument, GraphQlError, GraphQlRequest, GraphQlResponse, GET_PRODUCT, GET_PRODUCTS,
    GET_PRODUCT_OPTION,
};
pub use http::{HttpTransport, DEFAULT_TIMEOUT};
pub use model::{
    OptionInputPayload, ProductData, ProductListPayload, ProductOptionData, ProductOptionPayload,
    ProductPayload, ProductsData,
};
pub use request::{HttpRequest, Method};
pub use response::Response;
pub use source::{CatalogClient, Transport};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        CatalogClient, CatalogConfig, FetchError, FixtureTransport, HttpTransport, Transport,
    };
}
