//! Channel membership and directory types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One connection's membership in one channel.
///
/// Stored as an attribute of the channel's membership record, keyed by the
/// derived membership key of `connection_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEntry {
    pub connection_id: String,
    pub channel: String,
}

/// The global set of every channel name ever joined.
///
/// Grows monotonically. Serialises as a sorted array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDirectory {
    #[serde(default)]
    pub channels: BTreeSet<String>,
}

impl ChannelDirectory {
    /// Channel names in presentation order.
    pub fn sorted(&self) -> Vec<String> {
        self.channels.iter().cloned().collect()
    }
}
