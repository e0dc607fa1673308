use url::Url;

use crate::errors::RequestError;
use crate::net;
use crate::properties::{self, Properties};

/// A super simple blocking GET helper for tests that talk to a locally running server.
///
/// Every call resolves a relative path against the base location, opens its own
/// connection, and buffers the whole body. It is not meant for large responses and
/// must not be called from inside an async runtime.
#[derive(Debug, Clone)]
pub struct SimpleRequest {
    base: Url,
}

impl SimpleRequest {
    /// Creates a request helper that resolves all paths against `base`.
    pub fn new(base: Url) -> Result<Self, RequestError> {
        if base.cannot_be_a_base() {
            return Err(RequestError::InvalidBase {
                base: base.to_string(),
                reason: "URL cannot be used as a base for relative paths".to_string(),
            });
        }

        Ok(Self { base })
    }

    /// Parses `base` and creates a request helper from it.
    pub fn parse(base: &str) -> Result<Self, RequestError> {
        let url = Url::parse(base).map_err(|e| RequestError::InvalidBase {
            base: base.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(url)
    }

    /// Base location every relative path is resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves `relative_path` against the base location. An empty path yields the base itself.
    pub fn resolve(&self, relative_path: &str) -> Result<Url, RequestError> {
        self.base
            .join(relative_path)
            .map_err(|source| RequestError::Resolve {
                path: relative_path.to_string(),
                source,
            })
    }

    /// GETs `relative_path` and returns the body as text.
    ///
    /// The body is decoded with the charset announced by the server, falling back to
    /// UTF-8. Any status other than `200 OK` fails with `RequestError::Status`.
    pub fn get_string(&self, relative_path: &str) -> Result<String, RequestError> {
        let url = self.resolve(relative_path)?;
        println!("GET (String): {}", url);

        let res = net::fetch(&url)?;
        Ok(res.text()?)
    }

    /// GETs `relative_path` and parses the body as a property file.
    ///
    /// Same status handling as [`SimpleRequest::get_string`]. A body with a malformed
    /// `\uXXXX` escape fails with `RequestError::Properties`.
    pub fn get_properties(&self, relative_path: &str) -> Result<Properties, RequestError> {
        let url = self.resolve(relative_path)?;
        println!("GET (Properties): {}", url);

        let body = net::fetch(&url)?.bytes()?;
        Ok(properties::parse(&body)?)
    }
}
