//! Catalog fetch error types.

use mmtalk_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when fetching catalog data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The GraphQL response carried an `errors` array.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The GraphQL response had neither data nor errors.
    #[error("Response has no data for {0}")]
    MissingData(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The payload decoded but could not be turned into domain types.
    #[error("Invalid catalog payload: {0}")]
    Schema(#[from] CommerceError),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::HttpError {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => FetchError::RequestError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_errors_display() {
        let err = FetchError::GraphQl(vec!["Field not found".into(), "Invalid ID".into()]);
        assert_eq!(err.to_string(), "GraphQL errors: Field not found; Invalid ID");
    }

    #[test]
    fn test_schema_error_wraps_commerce_error() {
        let err: FetchError = CommerceError::UnknownOptionType("BUNDLE".into()).into();
        assert_eq!(
            err.to_string(),
            "Invalid catalog payload: Unknown option type: BUNDLE"
        );
    }
}
