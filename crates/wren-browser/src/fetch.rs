//! Resource fetching seam.
//!
//! The loader never talks to the network directly; it asks a [`Fetch`]
//! implementation for text. [`NetworkFetcher`] is the real one. Tests and
//! embedders can supply their own.

use wren_common::net::fetch_text;
use wren_common::{FetchError, Url};

/// Something that can turn a URL into text.
pub trait Fetch {
    /// Fetch the resource at `url` as text.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the resource cannot be retrieved.
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Fetches `http`, `https`, `file` and `data:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkFetcher;

impl Fetch for NetworkFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        fetch_text(url)
    }
}
