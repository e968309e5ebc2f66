//! Fetch error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} for {route}")]
    Status { route: String, status: u16 },

    #[error("Content region '{selector}' missing from {route}")]
    MissingContent { route: String, selector: String },

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

impl FetchError {
    /// True when the server answered but the page did not have the expected shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::MissingContent { .. })
    }
}
