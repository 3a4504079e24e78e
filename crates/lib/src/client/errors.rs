//! Error types for the transport client.

use thiserror::Error;

/// Errors raised while talking to the CouchDB admin API.
///
/// None of these are retried or reinterpreted; they reach the caller as-is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The configured instance URL cannot be used to build endpoint URLs.
    #[error("Invalid instance URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The basic-auth credential cannot be encoded into a header value.
    #[error("Credentials cannot be used in an Authorization header")]
    InvalidCredentials,

    /// The HTTP request failed before a response was read.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("Request to {url} returned HTTP status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// Check if this error comes from the configured URL or credentials.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidUrl { .. } | ClientError::InvalidCredentials
        )
    }

    /// Check if this is a network/connection error.
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Request { .. })
    }

    /// Check if the server rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Status { status, .. }
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN
        )
    }

    /// Check if the server responded with a body that could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }

    /// HTTP status of the response, when the error carries one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Conversion from ClientError to the main Error type
impl From<ClientError> for crate::Error {
    fn from(err: ClientError) -> Self {
        crate::Error::Client(err)
    }
}
