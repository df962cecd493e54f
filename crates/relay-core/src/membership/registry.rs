//! Membership registry over the shared record store.
//!
//! Each channel has one membership record whose attributes are derived
//! membership keys mapping to `{connection_id, channel}` entries. A single
//! directory record holds the set of every channel name ever joined.
//!
//! Every method touches one record per store call, so each call is atomic
//! on its own but `join` (membership record + directory record) is two
//! independent writes.

use std::sync::Arc;

use relay_types::channel::{ChannelDirectory, MembershipEntry};
use relay_types::error::RepositoryError;
use serde_json::Value;
use tracing::{debug, warn};

use super::key::{is_membership_key, membership_key};
use crate::hash::ContentHasher;
use crate::store::keys::{self, DIRECTORY_ATTRIBUTE};
use crate::store::{RecordStore, RecordUpdate};

/// Tracks channel membership and the channel directory.
pub struct MembershipRegistry<S: RecordStore, H: ContentHasher> {
    store: Arc<S>,
    hasher: H,
}

impl<S: RecordStore, H: ContentHasher> MembershipRegistry<S, H> {
    pub fn new(store: Arc<S>, hasher: H) -> Self {
        Self { store, hasher }
    }

    /// Derived membership key for a connection id.
    pub fn member_key(&self, connection_id: &str) -> String {
        membership_key(&self.hasher, connection_id)
    }

    /// Upsert `connection_id` into `channel` and record the channel in the
    /// directory. Re-joining the same channel changes nothing.
    pub async fn join(&self, connection_id: &str, channel: &str) -> Result<(), RepositoryError> {
        let entry = MembershipEntry {
            connection_id: connection_id.to_string(),
            channel: channel.to_string(),
        };
        let value = serde_json::to_value(&entry)
            .map_err(|e| RepositoryError::Malformed(format!("membership entry: {e}")))?;

        self.store
            .update(
                &keys::membership(channel),
                RecordUpdate::Set {
                    attribute: self.member_key(connection_id),
                    value,
                },
            )
            .await?;

        self.store
            .update(
                &keys::directory(),
                RecordUpdate::AddToSet {
                    attribute: DIRECTORY_ATTRIBUTE.to_string(),
                    values: vec![channel.to_string()],
                },
            )
            .await?;

        debug!(%connection_id, %channel, "joined channel");
        Ok(())
    }

    /// Remove `connection_id` from `channel`. No-op if it is not a member.
    pub async fn leave(&self, connection_id: &str, channel: &str) -> Result<(), RepositoryError> {
        self.store
            .update(
                &keys::membership(channel),
                RecordUpdate::Remove {
                    attribute: self.member_key(connection_id),
                },
            )
            .await?;

        debug!(%connection_id, %channel, "left channel");
        Ok(())
    }

    /// Connection ids with a membership entry in `channel`, from one read.
    ///
    /// A channel that was never joined reads the same as an empty one.
    pub async fn list_members(&self, channel: &str) -> Result<Vec<String>, RepositoryError> {
        let Some(record) = self.store.get(&keys::membership(channel)).await? else {
            return Ok(Vec::new());
        };

        let mut members = Vec::with_capacity(record.len());
        for (attribute, value) in record {
            if !is_membership_key(&attribute) {
                continue;
            }
            match serde_json::from_value::<MembershipEntry>(value) {
                Ok(entry) => members.push(entry.connection_id),
                Err(e) => {
                    warn!(%channel, %attribute, error = %e, "skipping malformed membership entry");
                }
            }
        }
        Ok(members)
    }

    /// Every channel name ever joined, sorted.
    pub async fn list_channels(&self) -> Result<Vec<String>, RepositoryError> {
        let Some(record) = self.store.get(&keys::directory()).await? else {
            return Ok(Vec::new());
        };

        let directory: ChannelDirectory = serde_json::from_value(Value::Object(record))
            .map_err(|e| RepositoryError::Malformed(format!("channel directory: {e}")))?;
        Ok(directory.sorted())
    }
}
