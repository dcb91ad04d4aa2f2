//! Credential context for the NetBox API
//!
//! [`Auth`] holds the token and base URL applied to every request, plus the
//! shared blocking HTTP client. It is immutable after construction apart
//! from the internal validity flag written by [`Auth::is_valid`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::error::NetkitError;
use crate::request::netbox_request;

/// Credential context for a NetBox instance.
///
/// An `Auth` value is required by every collection that talks to the API
/// and is intended to be shared read-only across them. Only the internal
/// validity flag is ever written, and that write is a benign last-write-wins
/// race under concurrent [`Auth::is_valid`] calls.
pub struct Auth {
    http: Client,
    token: Option<String>,
    base_url: Option<String>,
    validated: AtomicBool,
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("token", &self.token.is_some())
            .field("base_url", &self.base_url)
            .field("validated", &self.validated.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Auth {
    /// Create an auth context with a token and base URL.
    ///
    /// Neither value is validated here; use [`Auth::is_valid`] to probe the
    /// instance.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be built.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, NetkitError> {
        Self::from_parts(Some(token.into()), Some(base_url.into()))
    }

    /// Create an auth context from optional parts.
    ///
    /// Compatibility constructor for callers that treat both the token and
    /// the base URL as optional. [`Auth::new`] is the preferred entry point.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be built.
    pub fn from_parts(
        token: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, NetkitError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(NetkitError::api)?;

        Ok(Self {
            http,
            token,
            base_url,
            validated: AtomicBool::new(false),
        })
    }

    /// The token passed into the context, or `None` when absent or empty
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    /// The base URL of the NetBox instance, or `None` when absent or empty
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.is_empty())
    }

    /// The shared blocking HTTP client
    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Probe the NetBox instance to verify connectivity and the token.
    ///
    /// Issues a live `GET /api/dcim/sites` on every invocation and returns
    /// true only for a literal 200 response. Transport failures and every
    /// other status yield false rather than an error. The result is also
    /// stored on the context.
    pub fn is_valid(&self) -> bool {
        let valid = match netbox_request(self, "/api/dcim/sites", None, Method::GET) {
            Ok(response) => response.status() == StatusCode::OK,
            Err(error) => {
                debug!("NetBox validity probe failed: {}", error);
                false
            }
        };
        self.validated.store(valid, Ordering::Relaxed);
        valid
    }
}
