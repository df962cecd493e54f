//! User profile store.
//!
//! Profiles are keyed by connection id. Readers apply the configured
//! defaults to whatever is missing, so a connection that never ran a command
//! has no record at all. Profiles outlive their connection; nothing
//! reclaims them after disconnect.

use std::sync::Arc;

use relay_types::config::RelayConfig;
use relay_types::error::RepositoryError;
use relay_types::profile::{ResolvedProfile, UserProfile};
use serde_json::Value;

use crate::store::{RecordStore, RecordUpdate, keys};

const CHANNEL_ATTRIBUTE: &str = "channel";
const USERNAME_ATTRIBUTE: &str = "username";

/// Reads and updates user profiles.
pub struct ProfileStore<S: RecordStore> {
    store: Arc<S>,
    config: Arc<RelayConfig>,
}

impl<S: RecordStore> ProfileStore<S> {
    pub fn new(store: Arc<S>, config: Arc<RelayConfig>) -> Self {
        Self { store, config }
    }

    /// Read a profile with defaults applied. Never fails for a missing record.
    pub async fn get(&self, connection_id: &str) -> Result<ResolvedProfile, RepositoryError> {
        let profile = match self.store.get(&keys::profile(connection_id)).await? {
            Some(record) => serde_json::from_value::<UserProfile>(Value::Object(record))
                .map_err(|e| RepositoryError::Malformed(format!("profile {connection_id}: {e}")))?,
            None => UserProfile::default(),
        };

        Ok(profile.resolve(
            connection_id,
            &self.config.default_channel,
            &self.config.default_username,
        ))
    }

    pub async fn set_username(
        &self,
        connection_id: &str,
        username: &str,
    ) -> Result<(), RepositoryError> {
        self.set_attribute(connection_id, USERNAME_ATTRIBUTE, username)
            .await
    }

    pub async fn set_channel(
        &self,
        connection_id: &str,
        channel: &str,
    ) -> Result<(), RepositoryError> {
        self.set_attribute(connection_id, CHANNEL_ATTRIBUTE, channel)
            .await
    }

    async fn set_attribute(
        &self,
        connection_id: &str,
        attribute: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        self.store
            .update(
                &keys::profile(connection_id),
                RecordUpdate::Set {
                    attribute: attribute.to_string(),
                    value: Value::String(value.to_string()),
                },
            )
            .await
    }
}
