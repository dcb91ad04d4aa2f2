//! Request helper for the NetBox API
//!
//! Every call into NetBox funnels through [`netbox_request`], which applies
//! the fixed headers, validates the HTTP method, and collapses all failure
//! modes into [`NetkitError::Api`].

use reqwest::Method;
use reqwest::blocking::Response;
use serde_json::Value;
use tracing::debug;

use crate::auth::Auth;
use crate::error::NetkitError;

/// Issue a single request against the NetBox API.
///
/// The URL is the auth context's base URL with `path` appended verbatim, so
/// the path must carry its own leading slash. Only `GET`, `POST` and `PUT`
/// are accepted; any other method is rejected before a request is made.
///
/// Any 2xx response is returned whole. Everything else, including non-2xx
/// statuses, connection failures and timeouts, is wrapped into
/// [`NetkitError::Api`] with the original cause attached.
///
/// # Errors
///
/// [`NetkitError::InvalidRequest`] for a disallowed method,
/// [`NetkitError::Api`] for every failure during the call itself.
pub fn netbox_request(
    auth: &Auth,
    path: &str,
    payload: Option<&Value>,
    method: Method,
) -> Result<Response, NetkitError> {
    if !matches!(method, Method::GET | Method::POST | Method::PUT) {
        return Err(NetkitError::InvalidRequest(
            "Method must be either GET, POST or PUT".to_string(),
        ));
    }

    // Base URL and path are concatenated verbatim, no slash normalization.
    // A missing base URL contributes nothing and the resulting invalid URL
    // surfaces through the uniform wrapped error below.
    let url = format!("{}{}", auth.base_url().unwrap_or_default(), path);
    debug!("Issuing {} {} against NetBox", method, url);

    // A missing token still produces an Authorization header, with the
    // literal placeholder "Token None". Compatibility quirk, kept on purpose.
    let mut request = auth
        .http()
        .request(method, &url)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .header(
            "Authorization",
            format!("Token {}", auth.token().unwrap_or("None")),
        );

    if let Some(payload) = payload {
        request = request.json(payload);
    }

    request
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(NetkitError::api)
}
