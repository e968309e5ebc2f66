//! Content region extraction and listing parsing

use scraper::{Html, Selector};

use crate::error::FetchError;
use crate::Result;

/// Marker of the swappable region in every page served by the RSVP server.
pub const DEFAULT_CONTENT_SELECTOR: &str = ".content-wrapper";

const GUEST_ROW_SELECTOR: &str = ".table tbody tr";
const PLACEHOLDER_CELL_SELECTOR: &str = "td[colspan]";

/// Parsed CSS selector for the content region, kept with its source text
/// for error reporting.
#[derive(Debug, Clone)]
pub struct ContentSelector {
    css: String,
    selector: Selector,
}

impl ContentSelector {
    pub fn parse(css: &str) -> Result<Self> {
        let selector = parse_selector(css)?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.css
    }
}

/// Inner markup of the first element matching `region`, or `None` when the
/// document has no such element.
pub fn extract_fragment(document: &str, region: &ContentSelector) -> Option<String> {
    let doc = Html::parse_document(document);
    let fragment = doc.select(&region.selector).next().map(|el| el.inner_html());
    fragment
}

/// Number of guest rows in a listing document.
///
/// Rows holding a `colspan` cell are the empty-state or no-results
/// placeholders and are not guests.
pub fn count_guest_rows(document: &str) -> Result<usize> {
    let rows = parse_selector(GUEST_ROW_SELECTOR)?;
    let placeholder = parse_selector(PLACEHOLDER_CELL_SELECTOR)?;

    let doc = Html::parse_document(document);
    let count = doc
        .select(&rows)
        .filter(|row| row.select(&placeholder).next().is_none())
        .count();

    Ok(count)
}

/// Sidebar badge text: "1 Guest", otherwise "N Guests".
pub fn guest_badge_text(count: usize) -> String {
    let noun = if count == 1 { "Guest" } else { "Guests" };
    format!("{count} {noun}")
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FetchError::Selector(format!("{css}: {e}")))
}
