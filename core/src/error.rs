//! Error types for the todo API client.
//!
//! # Design
//! Both variants are the same failure from the viewer's point of view: the
//! data could not be fetched. They stay separate so the log line says which
//! side failed. Fields are owned strings so errors can be cloned into
//! scripted test transports.

use thiserror::Error;

/// Errors returned by `ApiClient::fetch_data` and `Transport` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was obtained (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
