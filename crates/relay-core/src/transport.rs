//! Push-delivery gateway trait.
//!
//! The gateway owns the live client connections. The relay only ever asks it
//! to push one payload to one connection id; it never sees sockets.

use relay_types::error::DeliveryError;

/// Trait for the push-delivery transport.
///
/// A call attempts at most one delivery. It fails with
/// [`DeliveryError::Gone`] when the peer has already disconnected.
pub trait PushGateway: Send + Sync {
    fn post_to_connection(
        &self,
        connection_id: &str,
        payload: &str,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}
