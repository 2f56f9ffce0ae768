//! Common utilities for the Wren renderer.
//!
//! This crate provides shared infrastructure used by all pipeline components:
//! - **Warning System** - deduplicated warnings routed through the `log` facade
//! - **URLs** - parsing and relative resolution of resource locators
//! - **Networking** - blocking fetch for `http`, `https`, `file` and `data` URLs

pub mod net;
pub mod url;
pub mod warning;

pub use net::FetchError;
pub use url::{Scheme, Url, UrlError};
