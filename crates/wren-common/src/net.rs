//! Blocking fetch utilities for the Wren renderer.
//!
//! Provides the text fetch used by the document loader and stylesheet
//! fetcher. `http`/`https` go through reqwest, `file` reads from disk and
//! `data:` URLs are decoded in place.
use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use thiserror::Error;

use crate::url::{Scheme, Url};

/// User-Agent header sent with all requests.
const USER_AGENT: &str = "Wren/0.1";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while fetching a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    Status {
        /// The requested URL.
        url: String,
        /// Numeric status code.
        status: u16,
    },
    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A `data:` URL could not be decoded.
    #[error("invalid data URL: {0}")]
    DataUrl(String),
}

/// A parsed `data:` URL that can be decoded into raw bytes.
pub struct DataURL {
    /// Everything after `data:` (e.g. `text/css;base64,...`).
    pub raw_data: String,
}

impl DataURL {
    /// Create a new `DataURL` from the payload that follows `data:`.
    #[must_use]
    pub const fn new(raw_data: String) -> Self {
        Self { raw_data }
    }

    /// Decode the data URL payload into raw bytes.
    ///
    /// Base64 payloads are decoded; anything else is taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the comma separator is missing or
    /// base64 decoding fails.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        let (metadata, data) = self
            .raw_data
            .split_once(',')
            .ok_or_else(|| FetchError::DataUrl("missing comma".to_string()))?;

        if metadata.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(data)
                .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e}")))
        } else {
            Ok(data.as_bytes().to_vec())
        }
    }
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the resource cannot be reached, read, or
/// decoded.
pub fn fetch_text(url: &Url) -> Result<String, FetchError> {
    match url.scheme {
        Scheme::Http | Scheme::Https => fetch_http_text(&url.to_string()),
        Scheme::File => read_file(&url.path),
        Scheme::Data => {
            let bytes = DataURL::new(url.path.clone()).decode()?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Fetch an `http`/`https` URL and return its body as text.
fn fetch_http_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    log::debug!(target: "wren::net", "GET {url}");

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Connection", "close")
        .send()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.text().map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })
}

/// Read a local file as text.
fn read_file(path: &str) -> Result<String, FetchError> {
    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(FetchError::NotFound(path));
    }
    log::debug!(target: "wren::net", "reading {}", path.display());
    std::fs::read_to_string(&path).map_err(|source| FetchError::Io { path, source })
}
