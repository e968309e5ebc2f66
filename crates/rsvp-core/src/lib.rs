//! RSVP SPA Core
//!
//! One [`PageSession`] per page load owns the router, the fragment cache,
//! the view state and the enhancers bound to the current content.
//! Rust owns all state; the webview only renders it.

mod config;
mod error;
mod session;

pub use config::Config;
pub use error::CoreError;
pub use session::PageSession;

// Re-export the session's building blocks
pub use rsvp_enhance::{
    Enhancements, Field, FieldStatus, FilterView, FormValues, KeyChord, SubmitOutcome,
    ValidationError,
};
pub use rsvp_fetch::{guest_badge_text, DocumentSource, FetchError, HttpSource};
pub use rsvp_navigation::{Direction, NavigationError, NavigationOutcome, Route, SessionHistory};
pub use rsvp_view::{BoundElements, PageView, TransitionPhase, TransitionTimings};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
