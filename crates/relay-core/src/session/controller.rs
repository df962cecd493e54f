//! Session lifecycle controller.
//!
//! Composes the registry, profile store, message log, broadcast engine and
//! command router. Holds no per-connection state of its own: every event is
//! handled from what the record store says at that moment.

use std::sync::Arc;

use relay_types::config::RelayConfig;
use relay_types::error::{RelayError, RepositoryError};
use relay_types::event::{ControlCommand, InboundEvent, RelayResponse};
use relay_types::message::ChatMessage;
use tracing::{debug, info};

use crate::broadcast::BroadcastEngine;
use crate::command::CommandRouter;
use crate::hash::ContentHasher;
use crate::membership::MembershipRegistry;
use crate::message::MessageLog;
use crate::profile::ProfileStore;
use crate::store::RecordStore;
use crate::transport::PushGateway;

/// Handles connect/disconnect/message/control events.
///
/// Generic over the record store, membership hasher and push gateway so the
/// core never depends on relay-infra.
pub struct SessionController<S: RecordStore, H: ContentHasher, G: PushGateway> {
    config: Arc<RelayConfig>,
    registry: Arc<MembershipRegistry<S, H>>,
    profiles: Arc<ProfileStore<S>>,
    log: MessageLog<S>,
    broadcast: BroadcastEngine<S, H, G>,
    commands: CommandRouter<S, H, G>,
    gateway: Arc<G>,
}

impl<S: RecordStore, H: ContentHasher, G: PushGateway> SessionController<S, H, G> {
    /// Wire every component over one shared store and gateway.
    pub fn new(store: Arc<S>, hasher: H, gateway: Arc<G>, config: Arc<RelayConfig>) -> Self {
        let registry = Arc::new(MembershipRegistry::new(Arc::clone(&store), hasher));
        let profiles = Arc::new(ProfileStore::new(Arc::clone(&store), Arc::clone(&config)));

        Self {
            log: MessageLog::new(store),
            broadcast: BroadcastEngine::new(Arc::clone(&registry), Arc::clone(&gateway)),
            commands: CommandRouter::new(
                Arc::clone(&registry),
                Arc::clone(&profiles),
                Arc::clone(&gateway),
            ),
            config,
            registry,
            profiles,
            gateway,
        }
    }

    pub fn registry(&self) -> &MembershipRegistry<S, H> {
        &self.registry
    }

    pub fn profiles(&self) -> &ProfileStore<S> {
        &self.profiles
    }

    pub fn log(&self) -> &MessageLog<S> {
        &self.log
    }

    /// Dispatch one inbound event.
    pub async fn handle(&self, event: &InboundEvent) -> Result<RelayResponse, RelayError> {
        match event {
            InboundEvent::Connect { connection_id } => Ok(self.connect(connection_id).await?),
            InboundEvent::Disconnect { connection_id } => {
                Ok(self.disconnect(connection_id).await?)
            }
            InboundEvent::Message {
                connection_id,
                text,
                request_time,
            } => self.message(connection_id, text, *request_time).await,
            InboundEvent::Command {
                connection_id,
                command,
            } => self.command(connection_id, *command).await,
        }
    }

    /// Join the default channel. Writes no profile; readers default it.
    pub async fn connect(&self, connection_id: &str) -> Result<RelayResponse, RepositoryError> {
        self.registry
            .join(connection_id, &self.config.default_channel)
            .await?;
        info!(%connection_id, channel = %self.config.default_channel, "connected");
        Ok(RelayResponse::ok_with("connect"))
    }

    /// Leave whichever channel the profile names. The profile stays behind.
    pub async fn disconnect(&self, connection_id: &str) -> Result<RelayResponse, RepositoryError> {
        let profile = self.profiles.get(connection_id).await?;
        self.registry.leave(connection_id, &profile.channel).await?;
        info!(%connection_id, channel = %profile.channel, "disconnected");
        Ok(RelayResponse::ok_with("disconnect"))
    }

    /// Handle chat text: blank is a no-op, slash-prefixed goes to the
    /// command router, anything else is logged and broadcast.
    ///
    /// The response body is the JSON-encoded raw text, as acknowledgment.
    pub async fn message(
        &self,
        connection_id: &str,
        text: &str,
        request_time: i64,
    ) -> Result<RelayResponse, RelayError> {
        if text.trim().is_empty() {
            return Ok(RelayResponse::ok());
        }
        if text.starts_with('/') {
            return self.commands.handle(connection_id, text).await;
        }

        let profile = self.profiles.get(connection_id).await?;
        let message = ChatMessage {
            channel: profile.channel,
            timestamp: request_time,
            connection_id: connection_id.to_string(),
            text: text.to_string(),
        };
        self.log.append(&message).await?;

        let report = self
            .broadcast
            .broadcast(
                &message.formatted(&profile.username),
                &message.channel,
                connection_id,
            )
            .await?;
        debug!(%connection_id, channel = %message.channel, delivered = report.delivered, failed = report.failed, "message relayed");

        let ack = serde_json::to_string(text)
            .map_err(|e| RepositoryError::Malformed(format!("acknowledgment: {e}")))?;
        Ok(RelayResponse::ok_with(ack))
    }

    /// Handle a control-plane command. Results go to the caller only.
    pub async fn command(
        &self,
        connection_id: &str,
        command: ControlCommand,
    ) -> Result<RelayResponse, RelayError> {
        match command {
            ControlCommand::ListChannels => self.query_channels(connection_id).await,
        }
    }

    /// Unicast `{"channelsList": [...]}` with the sorted directory.
    pub async fn query_channels(&self, connection_id: &str) -> Result<RelayResponse, RelayError> {
        let channels = self.registry.list_channels().await?;
        let payload = serde_json::json!({ "channelsList": channels }).to_string();
        self.gateway
            .post_to_connection(connection_id, &payload)
            .await?;
        Ok(RelayResponse::ok())
    }
}
