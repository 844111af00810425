//! HTTP request builder.

use crate::config::CatalogConfig;
use crate::graphql::GraphQlRequest;
use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods the catalog client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    /// GraphQL operation this request carries, if any.
    pub operation_name: Option<String>,
}

impl HttpRequest {
    /// Create a new request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            operation_name: None,
        }
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Build the POST for a GraphQL operation against the configured endpoint.
    pub fn graphql(config: &CatalogConfig, request: &GraphQlRequest) -> Result<Self, FetchError> {
        let mut http = Self::post(&config.endpoint).json(request)?;
        if let Some(token) = config.api_token.as_deref() {
            http = http.bearer_auth(token);
        }
        http.operation_name = Some(request.operation_name.clone());
        Ok(http)
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Get a header value (case-insensitive).
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the JSON body back into a value.
    pub fn body_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, FetchError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| FetchError::ParseError("request has no body".to_string()))?;
        Ok(serde_json::from_slice(body)?)
    }
}
