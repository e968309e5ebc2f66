//! Document sources and the content fetcher

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::fragment::{count_guest_rows, extract_fragment, ContentSelector};
use crate::Result;

/// Anything that can hand back the full HTML document served at a route.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self, route: &str) -> Result<String>;
}

/// `DocumentSource` backed by the RSVP HTTP server.
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// No timeout is applied unless one is given; the network stack's
    /// defaults apply otherwise.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidRoute(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder()
            .redirect(Policy::limited(5))
            .user_agent(concat!("rsvp-spa/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, route: &str) -> Result<Url> {
        self.base_url
            .join(route)
            .map_err(|e| FetchError::InvalidRoute(format!("{route}: {e}")))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch_document(&self, route: &str) -> Result<String> {
        let url = self.resolve(route)?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // An error page is not content to swap in; treat it like a failed request
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                route: route.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        tracing::debug!(route = %route, bytes = body.len(), "Fetched document");

        Ok(body)
    }
}

/// Fetches routes and reduces them to their content fragment.
#[derive(Clone)]
pub struct ContentFetcher {
    source: Arc<dyn DocumentSource>,
    region: ContentSelector,
}

impl ContentFetcher {
    pub fn new(source: Arc<dyn DocumentSource>, region: ContentSelector) -> Self {
        Self { source, region }
    }

    pub fn region(&self) -> &ContentSelector {
        &self.region
    }

    /// Fetch `route` and return the inner markup of its content region.
    ///
    /// No retries. A page without the region is a `MissingContent` error.
    pub async fn fetch_fragment(&self, route: &str) -> Result<String> {
        let document = self.source.fetch_document(route).await?;

        extract_fragment(&document, &self.region).ok_or_else(|| FetchError::MissingContent {
            route: route.to_string(),
            selector: self.region.as_str().to_string(),
        })
    }

    /// Fetch the guest listing and count its guest rows.
    pub async fn fetch_guest_count(&self, listing_route: &str) -> Result<usize> {
        let document = self.source.fetch_document(listing_route).await?;
        count_guest_rows(&document)
    }
}
