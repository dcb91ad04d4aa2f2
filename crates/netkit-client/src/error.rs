//! Netkit client errors

use serde_json::{Value, json};
use thiserror::Error;

/// Message used when an operation fails without a usable description
const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetkitError {
    /// Invalid request (e.g., a disallowed HTTP method)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any transport or response failure, collapsed into one shape.
    ///
    /// Authentication failures, not-found responses, unreachable hosts and
    /// server errors all land here; callers cannot distinguish them other
    /// than by the message, but the original cause is kept as the source.
    #[error("Invalid response received from NetBox API when retrieving data: {message}")]
    Api {
        /// Textual description of the underlying failure
        message: String,
        /// The failure that was wrapped, when one exists
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A record field failed to resolve into its typed form
    #[error("Parse error: {0}")]
    Parse(String),

    /// A higher-level operation failed with a caller-facing message
    #[error("{0}")]
    Operation(String),
}

impl NetkitError {
    /// Wrap an underlying failure into the uniform API error shape
    pub(crate) fn api<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        NetkitError::Api {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// Build an operation error, substituting a generic message when the
    /// supplied one is empty
    pub fn operation(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            NetkitError::Operation(FALLBACK_MESSAGE.to_string())
        } else {
            NetkitError::Operation(message)
        }
    }

    /// The error message describing why the error was raised
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The error represented as a JSON object, for API-style error
    /// responses built a layer above this library
    pub fn as_json(&self) -> Value {
        json!({ "error": true, "message": self.message() })
    }
}
