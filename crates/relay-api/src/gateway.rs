//! In-process push gateway backed by the live WebSocket connections.
//!
//! Each socket task registers an unbounded channel under its connection id
//! and drains it into the socket. Delivering to an id that never registered,
//! or whose task has already exited, is reported as [`DeliveryError::Gone`].

use dashmap::DashMap;
use tokio::sync::mpsc;

use relay_core::transport::PushGateway;
use relay_types::error::DeliveryError;

/// Connection id -> outbound queue of the socket task that owns it.
#[derive(Debug, Default)]
pub struct WsGateway {
    connections: DashMap<String, mpsc::UnboundedSender<String>>,
}

impl WsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return the receiver its socket task drains.
    ///
    /// Registering an id twice replaces the earlier queue.
    pub fn register(&self, connection_id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.insert(connection_id.to_string(), tx);
        rx
    }

    pub fn unregister(&self, connection_id: &str) {
        self.connections.remove(connection_id);
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }
}

impl PushGateway for WsGateway {
    async fn post_to_connection(
        &self,
        connection_id: &str,
        payload: &str,
    ) -> Result<(), DeliveryError> {
        let sent = match self.connections.get(connection_id) {
            Some(sender) => sender.send(payload.to_string()).is_ok(),
            None => false,
        };

        if sent {
            Ok(())
        } else {
            Err(DeliveryError::Gone(connection_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_registered_connection() {
        let gateway = WsGateway::new();
        let mut rx = gateway.register("c1");

        gateway.post_to_connection("c1", "hello").await.unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
        assert_eq!(gateway.len(), 1);
    }

    #[tokio::test]
    async fn unknown_connection_is_gone() {
        let gateway = WsGateway::new();

        let err = gateway.post_to_connection("nobody", "hi").await.unwrap_err();

        assert!(matches!(err, DeliveryError::Gone(id) if id == "nobody"));
    }

    #[tokio::test]
    async fn dropped_receiver_is_gone() {
        let gateway = WsGateway::new();
        drop(gateway.register("c1"));

        let err = gateway.post_to_connection("c1", "hi").await.unwrap_err();

        assert!(matches!(err, DeliveryError::Gone(_)));
    }

    #[tokio::test]
    async fn unregister_removes_connection() {
        let gateway = WsGateway::new();
        let _rx = gateway.register("c1");

        gateway.unregister("c1");

        assert_eq!(gateway.len(), 0);
        assert!(gateway.post_to_connection("c1", "hi").await.is_err());
    }
}
