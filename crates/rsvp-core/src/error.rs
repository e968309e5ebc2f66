//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Navigation error: {0}")]
    Navigation(#[from] rsvp_navigation::NavigationError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] rsvp_fetch::FetchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
