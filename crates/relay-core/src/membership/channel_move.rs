//! Moving a connection from one channel to another.
//!
//! The move is three independent single-record writes: leave the old
//! channel, point the profile at the new one, join the new one. Between the
//! steps the connection can be in no channel, or its profile can name a
//! channel whose membership record does not list it yet. The next move or
//! disconnect reads the profile again, so the gap closes by itself.

use relay_types::error::RepositoryError;
use tracing::info;

use super::registry::MembershipRegistry;
use crate::hash::ContentHasher;
use crate::profile::ProfileStore;
use crate::store::RecordStore;

/// Outcome of a channel move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMove {
    pub from: String,
    pub to: String,
}

/// Move `connection_id` into `new_channel`.
pub async fn move_channel<S: RecordStore, H: ContentHasher>(
    registry: &MembershipRegistry<S, H>,
    profiles: &ProfileStore<S>,
    connection_id: &str,
    new_channel: &str,
) -> Result<ChannelMove, RepositoryError> {
    let old_channel = profiles.get(connection_id).await?.channel;

    registry.leave(connection_id, &old_channel).await?;
    profiles.set_channel(connection_id, new_channel).await?;
    registry.join(connection_id, new_channel).await?;

    info!(%connection_id, from = %old_channel, to = %new_channel, "moved channel");
    Ok(ChannelMove {
        from: old_channel,
        to: new_channel.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{FnvHasher, config, memory_store};

    #[tokio::test]
    async fn move_from_general_to_tech() {
        let store = memory_store();
        let registry = MembershipRegistry::new(Arc::clone(&store), FnvHasher);
        let profiles = ProfileStore::new(Arc::clone(&store), config());

        registry.join("x", "general").await.unwrap();
        let moved = move_channel(&registry, &profiles, "x", "tech").await.unwrap();

        assert_eq!(moved.from, "general");
        assert_eq!(moved.to, "tech");
        assert!(registry.list_members("general").await.unwrap().is_empty());
        assert_eq!(registry.list_members("tech").await.unwrap(), vec!["x"]);
        assert_eq!(profiles.get("x").await.unwrap().channel, "tech");
        assert_eq!(registry.list_channels().await.unwrap(), vec!["general", "tech"]);
    }

    #[tokio::test]
    async fn consecutive_moves_leave_one_membership() {
        let store = memory_store();
        let registry = MembershipRegistry::new(Arc::clone(&store), FnvHasher);
        let profiles = ProfileStore::new(Arc::clone(&store), config());

        registry.join("x", "general").await.unwrap();
        move_channel(&registry, &profiles, "x", "tech").await.unwrap();
        let moved = move_channel(&registry, &profiles, "x", "books").await.unwrap();

        assert_eq!(moved.from, "tech");
        assert!(registry.list_members("tech").await.unwrap().is_empty());
        assert_eq!(registry.list_members("books").await.unwrap(), vec!["x"]);
    }

    #[tokio::test]
    async fn move_to_current_channel_keeps_membership() {
        let store = memory_store();
        let registry = MembershipRegistry::new(Arc::clone(&store), FnvHasher);
        let profiles = ProfileStore::new(Arc::clone(&store), config());

        registry.join("x", "general").await.unwrap();
        move_channel(&registry, &profiles, "x", "general").await.unwrap();

        assert_eq!(registry.list_members("general").await.unwrap(), vec!["x"]);
    }
}
