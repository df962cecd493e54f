use thiserror::Error;

/// Errors from record store operations (used by trait definitions in relay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("store throttled the request")]
    Throttled,

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Errors from a single push delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The peer connection no longer exists.
    #[error("connection {0} is gone")]
    Gone(String),

    /// The peer may still exist but the transport could not deliver.
    ///
    /// Reserved for gateways that push over a network. The in-process
    /// WebSocket gateway only ever reports `Gone`: a closed outbound queue
    /// means the socket task has exited.
    #[error("delivery failed: {0}")]
    Failed(String),
}

/// Aggregate error for a failed relay invocation.
///
/// Store failures and failed unicast replies surface here. Per-recipient
/// broadcast failures never do.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Store(#[from] RepositoryError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_delivery_error_display() {
        let err = DeliveryError::Gone("abc=".to_string());
        assert_eq!(err.to_string(), "connection abc= is gone");
    }

    #[test]
    fn test_relay_error_is_transparent() {
        let err: RelayError = RepositoryError::Throttled.into();
        assert_eq!(err.to_string(), "store throttled the request");
        assert!(matches!(err, RelayError::Store(RepositoryError::Throttled)));
    }
}
