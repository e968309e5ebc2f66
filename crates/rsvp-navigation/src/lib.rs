//! RSVP Navigation
//!
//! Fakes multi-page navigation inside one page session:
//! 1. Same route → nothing happens
//! 2. Cached route → swap in the cached fragment
//! 3. Unknown route → fetch, cache, then swap
//!
//! At most one navigation runs at a time; a second request while one is in
//! flight is rejected.

mod cache;
mod error;
mod history;
mod route;
mod router;

pub use cache::NavigationCache;
pub use error::NavigationError;
pub use history::{Direction, SessionHistory};
pub use route::Route;
pub use router::{NavigationOutcome, Router};

pub type Result<T> = std::result::Result<T, NavigationError>;
