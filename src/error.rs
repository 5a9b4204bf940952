//! Error types for the Soundside aggregation layer
//!
//! Two families with very different propagation rules: [`ProviderError`] is
//! raised by adapters and absorbed by the aggregation controllers, which
//! substitute fallback data instead of surfacing it. [`InputError`] marks a
//! caller mistake and is the only class that crosses the controller boundary.

use thiserror::Error;

/// Failure classes for one upstream provider call.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Credential absent at startup; checked before any network attempt
    #[error("provider credential missing")]
    CredentialMissing,

    /// No response within the per-call budget
    #[error("provider request timed out")]
    Timeout,

    /// Non-2xx response; the status is kept for logging only
    #[error("provider returned HTTP {0}")]
    Http(u16),

    /// Transport failure that produced no HTTP status (DNS, connect refused)
    #[error("provider network error: {0}")]
    Network(String),

    /// 2xx response whose body does not match the expected schema
    #[error("provider response malformed: {0}")]
    Parse(String),

    /// Structurally valid response with nothing usable in it
    #[error("provider returned no usable results")]
    Empty,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Http(status.as_u16())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Caller-supplied input that cannot be served.
///
/// Substituting sample data for these would hide bugs in the caller, so they
/// surface as real errors (HTTP 400 at the API layer).
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("invalid location id: {0:?}")]
    InvalidLocationId(String),

    #[error("limit must be within 1..={max}, got {got}")]
    InvalidLimit { got: usize, max: usize },

    #[error("location cannot be empty")]
    EmptyLocation,
}
