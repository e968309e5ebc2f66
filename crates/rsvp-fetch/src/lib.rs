//! RSVP Content Fetcher
//!
//! Pulls full page documents from the RSVP server and keeps only the
//! region the page shell swaps in:
//! - `GET <route>` through a [`DocumentSource`]
//! - parse as HTML, keep the inner markup of `.content-wrapper`
//! - count guest rows on the listing page for the sidebar badge

mod error;
mod fragment;
mod source;

pub use error::FetchError;
pub use fragment::{
    count_guest_rows, extract_fragment, guest_badge_text, ContentSelector,
    DEFAULT_CONTENT_SELECTOR,
};
pub use source::{ContentFetcher, DocumentSource, HttpSource};

pub type Result<T> = std::result::Result<T, FetchError>;
