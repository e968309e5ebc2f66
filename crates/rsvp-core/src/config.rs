//! Page session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use rsvp_fetch::{ContentSelector, DEFAULT_CONTENT_SELECTOR};
use rsvp_view::TransitionTimings;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the RSVP server
    pub base_url: String,
    /// CSS selector of the swappable content region
    pub content_selector: String,
    /// Page listing the guests, polled for the sidebar badge
    pub listing_route: String,
    /// Guest badge refresh period
    pub guest_poll_interval_ms: u64,
    /// Delay between an accepted form submission and the badge refresh
    pub guest_refresh_delay_ms: u64,
    pub timings: TransitionTimings,
    /// Request timeout; `None` leaves it to the network stack
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            listing_route: "/list".to_string(),
            guest_poll_interval_ms: 30_000,
            guest_refresh_delay_ms: 1_000,
            timings: TransitionTimings::default(),
            request_timeout_secs: None,
        }
    }

    /// Defaults overridden by `RSVP_BASE_URL`, `RSVP_CONTENT_SELECTOR` and
    /// `RSVP_LISTING_ROUTE` when set.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup("RSVP_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(selector) = lookup("RSVP_CONTENT_SELECTOR") {
            config.content_selector = selector;
        }
        if let Some(route) = lookup("RSVP_LISTING_ROUTE") {
            config.listing_route = route;
        }
        config
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| CoreError::Config(format!("base_url '{}': {e}", self.base_url)))?;

        if !self.listing_route.starts_with('/') {
            return Err(CoreError::Config(format!(
                "listing_route must start with '/': {}",
                self.listing_route
            )));
        }

        ContentSelector::parse(&self.content_selector)
            .map_err(|e| CoreError::Config(e.to_string()))?;

        if self.guest_poll_interval_ms == 0 {
            return Err(CoreError::Config(
                "guest_poll_interval_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn guest_poll_interval(&self) -> Duration {
        Duration::from_millis(self.guest_poll_interval_ms)
    }

    pub fn guest_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.guest_refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        // The RSVP server listens on 5000 unless PORT says otherwise
        Self::new("http://localhost:5000")
    }
}
