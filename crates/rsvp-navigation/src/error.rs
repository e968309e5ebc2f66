//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Navigation to {pending} in progress, {requested} rejected")]
    InFlight { pending: String, requested: String },

    #[error("No {0} history entry")]
    NotInHistory(&'static str),

    #[error("Fetch error: {0}")]
    Fetch(#[from] rsvp_fetch::FetchError),
}
