//! Error types for the blog API client.
//!
//! # Design
//! Panels never branch on the variant: every `ApiError` means "the request
//! failed" and is turned into the panel's single error state. The variants
//! exist so the failure can be logged with its cause before it is discarded.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The round trip never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
