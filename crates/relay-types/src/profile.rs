//! Per-connection user profile.

use serde::{Deserialize, Serialize};

/// Profile record as persisted.
///
/// Writers never fill in defaults; both fields stay `None` until a command
/// sets them. Readers resolve defaults via [`UserProfile::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A profile with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub connection_id: String,
    pub channel: String,
    pub username: String,
}

impl UserProfile {
    /// Apply defaults for any missing field.
    pub fn resolve(
        self,
        connection_id: &str,
        default_channel: &str,
        default_username: &str,
    ) -> ResolvedProfile {
        ResolvedProfile {
            connection_id: connection_id.to_string(),
            channel: self.channel.unwrap_or_else(|| default_channel.to_string()),
            username: self.username.unwrap_or_else(|| default_username.to_string()),
        }
    }
}
