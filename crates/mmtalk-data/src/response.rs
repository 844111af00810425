//! HTTP response handling.

use crate::graphql::GraphQlResponse;
use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Longest slice of an error body kept in [`FetchError::HttpError`].
const ERROR_BODY_LIMIT: usize = 200;

/// A response as seen by the catalog client.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A 200 response with a JSON body.
    pub fn json_ok<T: Serialize>(value: &T) -> Result<Self, FetchError> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(Self::new(200, headers, serde_json::to_vec(value)?))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Check the status, then unwrap a GraphQL envelope into its data.
    pub fn graphql<T: DeserializeOwned>(self, operation: &str) -> Result<T, FetchError> {
        self.error_for_status()?
            .json::<GraphQlResponse<T>>()?
            .into_data(operation)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error keeps at most the first 200 characters of the body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .text()
            .map(|body| body.chars().take(ERROR_BODY_LIMIT).collect())
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}
