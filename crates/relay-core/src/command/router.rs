//! Command router.
//!
//! Executes a parsed slash command for the issuing connection and unicasts
//! the confirmation back to it. Commands only mutate the caller's own
//! profile and membership and never broadcast to the channel.

use std::sync::Arc;

use relay_types::error::RelayError;
use relay_types::event::RelayResponse;
use tracing::debug;

use super::parse::SlashCommand;
use crate::hash::ContentHasher;
use crate::membership::{MembershipRegistry, move_channel};
use crate::profile::ProfileStore;
use crate::store::RecordStore;
use crate::transport::PushGateway;

/// Fixed reply for `/help` and anything unrecognised.
pub const HELP_TEXT: &str = "Valid commands: /help, /name [NAME], /channel [CHAN_NAME]";

/// Routes slash commands to membership and profile mutations.
pub struct CommandRouter<S: RecordStore, H: ContentHasher, G: PushGateway> {
    registry: Arc<MembershipRegistry<S, H>>,
    profiles: Arc<ProfileStore<S>>,
    gateway: Arc<G>,
}

impl<S: RecordStore, H: ContentHasher, G: PushGateway> CommandRouter<S, H, G> {
    pub fn new(
        registry: Arc<MembershipRegistry<S, H>>,
        profiles: Arc<ProfileStore<S>>,
        gateway: Arc<G>,
    ) -> Self {
        Self {
            registry,
            profiles,
            gateway,
        }
    }

    /// Execute a slash-prefixed `text` on behalf of `connection_id`.
    pub async fn handle(
        &self,
        connection_id: &str,
        text: &str,
    ) -> Result<RelayResponse, RelayError> {
        let command = SlashCommand::parse(text);
        debug!(%connection_id, ?command, "routing slash command");

        match command {
            SlashCommand::Name(name) => {
                self.profiles.set_username(connection_id, &name).await?;
                self.reply(connection_id, &format!("Set username to {name}"))
                    .await?;
                Ok(RelayResponse::ok_with("name"))
            }
            SlashCommand::Channel(channel) => {
                move_channel(&*self.registry, &*self.profiles, connection_id, &channel).await?;
                self.reply(connection_id, &format!("Changed to #{channel}"))
                    .await?;
                Ok(RelayResponse::ok_with("channel"))
            }
            SlashCommand::Help => {
                self.reply(connection_id, HELP_TEXT).await?;
                Ok(RelayResponse::ok_with("help"))
            }
        }
    }

    async fn reply(&self, connection_id: &str, text: &str) -> Result<(), RelayError> {
        self.gateway
            .post_to_connection(connection_id, text)
            .await
            .map_err(RelayError::from)
    }
}
