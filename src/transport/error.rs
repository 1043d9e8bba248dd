//! Transport layer error types.

/// Transport error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to reach the provider.
    #[error("connection error: {0}")]
    Connection(String),
    /// The request exceeded the client timeout.
    #[error("timeout")]
    Timeout,
    /// The request failed after the connection was established.
    #[error("request error: {0}")]
    Request(String),
}
