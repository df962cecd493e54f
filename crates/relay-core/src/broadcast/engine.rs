//! Broadcast engine.
//!
//! Enumerates a channel's members with a single registry read, then attempts
//! one delivery per member except the sender. Deliveries run concurrently
//! and each outcome is independent: a failed recipient is logged and
//! counted, never retried, never pruned, and never fails the broadcast.
//!
//! Enumeration is not coordinated with concurrent joins or leaves. A member
//! joining mid-fan-out can miss the message; one leaving can still get it.

use std::sync::Arc;

use futures_util::future::join_all;
use relay_types::error::RepositoryError;
use tracing::{debug, warn};

use crate::hash::ContentHasher;
use crate::membership::MembershipRegistry;
use crate::store::RecordStore;
use crate::transport::PushGateway;

/// Per-broadcast delivery tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Members other than the sender.
    pub recipients: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Delivers a payload to every other member of a channel.
pub struct BroadcastEngine<S: RecordStore, H: ContentHasher, G: PushGateway> {
    registry: Arc<MembershipRegistry<S, H>>,
    gateway: Arc<G>,
}

impl<S: RecordStore, H: ContentHasher, G: PushGateway> BroadcastEngine<S, H, G> {
    pub fn new(registry: Arc<MembershipRegistry<S, H>>, gateway: Arc<G>) -> Self {
        Self { registry, gateway }
    }

    /// Send `payload` to every member of `channel` except `sender_id`.
    ///
    /// Only the membership read can fail; delivery failures are absorbed
    /// into the report.
    pub async fn broadcast(
        &self,
        payload: &str,
        channel: &str,
        sender_id: &str,
    ) -> Result<BroadcastReport, RepositoryError> {
        let members = self.registry.list_members(channel).await?;
        let recipients: Vec<&str> = members
            .iter()
            .map(String::as_str)
            .filter(|id| *id != sender_id)
            .collect();

        let deliveries = recipients.iter().map(|recipient| async move {
            let outcome = self.gateway.post_to_connection(recipient, payload).await;
            if let Err(e) = &outcome {
                warn!(%channel, recipient = %recipient, error = %e, "delivery failed, skipping recipient");
            }
            outcome.is_ok()
        });
        let outcomes = join_all(deliveries).await;

        let delivered = outcomes.iter().filter(|ok| **ok).count();
        let report = BroadcastReport {
            recipients: recipients.len(),
            delivered,
            failed: recipients.len() - delivered,
        };
        debug!(%channel, %sender_id, ?report, "broadcast complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;
    use crate::testing::{FnvHasher, RecordingGateway, ThrottledStore, memory_store};
    use relay_types::error::DeliveryError;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    type TestEngine = BroadcastEngine<InMemoryRecordStore, FnvHasher, RecordingGateway>;

    async fn setup(members: &[&str]) -> (TestEngine, Arc<RecordingGateway>) {
        let registry = Arc::new(MembershipRegistry::new(memory_store(), FnvHasher));
        for member in members {
            registry.join(member, "general").await.unwrap();
        }
        let gateway = Arc::new(RecordingGateway::new());
        (BroadcastEngine::new(registry, Arc::clone(&gateway)), gateway)
    }

    #[tokio::test]
    async fn delivers_to_everyone_but_sender() {
        let (engine, gateway) = setup(&["A", "B", "C"]).await;

        let report = engine.broadcast("hi", "general", "B").await.unwrap();

        assert_eq!(gateway.recipients(), vec!["A", "C"]);
        assert_eq!(
            report,
            BroadcastReport {
                recipients: 2,
                delivered: 2,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn failed_recipient_does_not_stop_the_rest() {
        let (engine, gateway) = setup(&["A", "B", "C", "D"]).await;
        gateway.mark_gone("C");

        let report = engine.broadcast("hi", "general", "A").await.unwrap();

        assert_eq!(gateway.recipients(), vec!["B", "D"]);
        assert_eq!(report.recipients, 3);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn all_recipients_failing_still_succeeds() {
        let (engine, gateway) = setup(&["A", "B"]).await;
        gateway.mark_gone("B");

        let report = engine.broadcast("hi", "general", "A").await.unwrap();
        assert_eq!(report.failed, 1);
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn stale_member_is_not_pruned() {
        let registry = Arc::new(MembershipRegistry::new(memory_store(), FnvHasher));
        registry.join("A", "general").await.unwrap();
        registry.join("ghost", "general").await.unwrap();
        let gateway = Arc::new(RecordingGateway::new());
        gateway.mark_gone("ghost");
        let engine = BroadcastEngine::new(Arc::clone(&registry), gateway);

        engine.broadcast("hi", "general", "A").await.unwrap();

        let mut members = registry.list_members("general").await.unwrap();
        members.sort();
        assert_eq!(members, vec!["A", "ghost"]);
    }

    #[tokio::test]
    async fn empty_channel_delivers_nothing() {
        let (engine, gateway) = setup(&[]).await;
        let report = engine.broadcast("hi", "general", "A").await.unwrap();
        assert_eq!(report, BroadcastReport::default());
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn payload_is_passed_through_unchanged() {
        let (engine, gateway) = setup(&["A", "B"]).await;
        engine.broadcast("#general Bob: hi", "general", "A").await.unwrap();
        assert_eq!(gateway.sent_to("B"), vec!["#general Bob: hi"]);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let registry = Arc::new(MembershipRegistry::new(Arc::new(ThrottledStore), FnvHasher));
        let engine = BroadcastEngine::new(registry, Arc::new(RecordingGateway::new()));

        let result = engine.broadcast("hi", "general", "A").await;
        assert!(matches!(result, Err(RepositoryError::Throttled)));
    }

    /// Gateway where delivery to `A` and to `C` each wait for the other to
    /// have started. Completes only if deliveries overlap.
    #[derive(Default)]
    struct RendezvousGateway {
        a_started: Notify,
        c_started: Notify,
        sent: Mutex<Vec<String>>,
    }

    impl PushGateway for RendezvousGateway {
        async fn post_to_connection(
            &self,
            connection_id: &str,
            _payload: &str,
        ) -> Result<(), DeliveryError> {
            match connection_id {
                "A" => {
                    self.a_started.notify_one();
                    self.c_started.notified().await;
                }
                "C" => {
                    self.c_started.notify_one();
                    self.a_started.notified().await;
                }
                _ => {}
            }
            self.sent.lock().unwrap().push(connection_id.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn deliveries_run_concurrently() {
        let registry = Arc::new(MembershipRegistry::new(memory_store(), FnvHasher));
        for member in ["A", "B", "C"] {
            registry.join(member, "general").await.unwrap();
        }
        let gateway = Arc::new(RendezvousGateway::default());
        let engine = BroadcastEngine::new(registry, Arc::clone(&gateway));

        let report = timeout(Duration::from_secs(5), engine.broadcast("hi", "general", "B"))
            .await
            .expect("deliveries were serialized")
            .unwrap();

        assert_eq!(report.delivered, 2);
        let mut sent = gateway.sent.lock().unwrap().clone();
        sent.sort();
        assert_eq!(sent, vec!["A", "C"]);
    }
}
