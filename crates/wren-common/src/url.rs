//! Resource locators.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Only the shapes the loader needs are supported:
//! `scheme://host[:port]/path` for `http`, `https` and `file`, plus opaque
//! `data:` URLs. Relative references are resolved against a base URL the way
//! a browser resolves `href` attributes.

use std::fmt;

use thiserror::Error;

/// URL schemes understood by the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain HTTP (default port 80).
    Http,
    /// HTTP over TLS (default port 443).
    Https,
    /// Local file path.
    File,
    /// Inline `data:` payload.
    Data,
}

impl Scheme {
    /// The scheme's default port, if it has one.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::File | Self::Data => None,
        }
    }

    /// The scheme name as written in a URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::File => "file",
            Self::Data => "data",
        }
    }
}

/// Errors produced while parsing or resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The input has no `scheme://` prefix.
    #[error("missing scheme in '{0}'")]
    MissingScheme(String),
    /// The scheme is not one of `http`, `https`, `file`, `data`.
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
    /// The port after `host:` is not a valid number.
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    /// A network URL without a host.
    #[error("missing host in '{0}'")]
    MissingHost(String),
}

/// A parsed resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    /// The URL scheme.
    pub scheme: Scheme,
    /// Host name; empty for `file` and `data` URLs.
    pub host: String,
    /// Explicit or default port.
    pub port: Option<u16>,
    /// Absolute path for hierarchical URLs, or the raw payload (everything
    /// after `data:`) for data URLs.
    pub path: String,
}

impl Url {
    /// Parse an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns a [`UrlError`] when the scheme is missing or unsupported, the
    /// port is not numeric, or a network URL has no host.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let input = input.trim();

        if let Some(payload) = input.strip_prefix("data:") {
            return Ok(Self {
                scheme: Scheme::Data,
                host: String::new(),
                port: None,
                path: payload.to_string(),
            });
        }

        let (scheme, rest) = input
            .split_once("://")
            .ok_or_else(|| UrlError::MissingScheme(input.to_string()))?;

        let scheme = match scheme.to_ascii_lowercase().as_str() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "file" => Scheme::File,
            other => return Err(UrlError::UnsupportedScheme(other.to_string())),
        };

        let (authority, path) = match rest.find('/') {
            Some(slash) => (&rest[..slash], &rest[slash..]),
            None => (rest, "/"),
        };

        if scheme == Scheme::File {
            return Ok(Self {
                scheme,
                host: authority.to_string(),
                port: None,
                path: path.to_string(),
            });
        }

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| UrlError::InvalidPort(port.to_string()))?;
                (host, Some(port))
            }
            None => (authority, scheme.default_port()),
        };

        if host.is_empty() {
            return Err(UrlError::MissingHost(input.to_string()));
        }

        Ok(Self {
            scheme,
            host: host.to_ascii_lowercase(),
            port,
            path: path.to_string(),
        })
    }

    /// Resolve `href` relative to this URL.
    ///
    /// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
    ///
    /// Handles absolute URLs, scheme-relative (`//host/x`), host-relative
    /// (`/x`) and path-relative (`x`, `./x`, `../x`) references.
    ///
    /// # Errors
    ///
    /// Returns a [`UrlError`] if the resolved URL cannot be parsed.
    pub fn resolve(&self, href: &str) -> Result<Self, UrlError> {
        let href = href.trim();

        if href.contains("://") || href.starts_with("data:") {
            return Self::parse(href);
        }

        if href.starts_with("//") {
            return Self::parse(&format!("{}:{href}", self.scheme.as_str()));
        }

        if href.starts_with('/') {
            return Ok(Self {
                path: href.to_string(),
                ..self.clone()
            });
        }

        let mut dir = self.path.rsplit_once('/').map_or("", |(dir, _)| dir);
        let mut relative = href;
        loop {
            if let Some(rest) = relative.strip_prefix("./") {
                relative = rest;
            } else if let Some(rest) = relative.strip_prefix("../") {
                relative = rest;
                dir = dir.rsplit_once('/').map_or("", |(parent, _)| parent);
            } else {
                break;
            }
        }

        Ok(Self {
            path: format!("{dir}/{relative}"),
            ..self.clone()
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scheme == Scheme::Data {
            return write!(f, "data:{}", self.path);
        }
        write!(f, "{}://{}", self.scheme.as_str(), self.host)?;
        if let Some(port) = self.port
            && Some(port) != self.scheme.default_port()
        {
            write!(f, ":{port}")?;
        }
        write!(f, "{}", self.path)
    }
}
