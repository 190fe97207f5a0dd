//! Error types for the relay middleware
//!
//! Construction-time errors (`Disabled`, `Connect`) are the only ones a
//! caller ever sees. Per-request errors (`Send`, `Encode`) are caught inside
//! the middleware and reported through `tracing` without touching the
//! request's outcome.

use thiserror::Error;

/// Main error type for relay operations
#[derive(Error, Debug)]
pub enum RelayError {
    /// Middleware was constructed with `enabled == false`
    #[error("middleware disabled by configuration")]
    Disabled,

    /// TCP connection to the collector could not be established
    #[error("failed to connect to collector: {0}")]
    Connect(#[source] std::io::Error),

    /// Writing a record to the collector socket failed
    #[error("failed to send record to collector: {0}")]
    Send(#[source] std::io::Error),

    /// Record could not be serialized into a wire frame
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_display() {
        let err = RelayError::Disabled;
        assert_eq!(err.to_string(), "middleware disabled by configuration");
    }

    #[test]
    fn test_connect_display() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RelayError::Connect(io);
        assert!(err.to_string().contains("failed to connect"));
    }

    #[test]
    fn test_encode_from_json() {
        let json_err = serde_json::from_str::<()>("not json").unwrap_err();
        let err: RelayError = json_err.into();
        assert!(matches!(err, RelayError::Encode(_)));
    }
}
