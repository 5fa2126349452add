//! Error types for the demo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the service answers every
//! unmatched route with a 404 directory, which callers usually want to tell
//! apart from a route that exists but refused the input. Refusals that carry
//! the service's JSON `error` message land in `Rejected`; anything else
//! unexpected keeps the raw status and body in `HttpError`.

/// Errors returned by `DemoClient` and the `Transport` implementations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: no route matched the request.
    #[error("route not found")]
    NotFound,

    /// The server refused the request with a JSON error body (400, 403).
    #[error("HTTP {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    /// The server returned an unexpected status without a usable error body.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The base URL cannot have route segments appended to it.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),
}
