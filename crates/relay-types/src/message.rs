//! Chat message log entries.

use serde::{Deserialize, Serialize};

/// A chat message as appended to a channel's log.
///
/// `timestamp` is the originating request's epoch millis and doubles as the
/// record's sort key. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub channel: String,
    pub timestamp: i64,
    pub connection_id: String,
    pub text: String,
}

impl ChatMessage {
    /// Text as fanned out to the other members of the channel.
    pub fn formatted(&self, username: &str) -> String {
        format!("#{} {}: {}", self.channel, username, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_prefixes_channel_and_username() {
        let msg = ChatMessage {
            channel: "tech".to_string(),
            timestamp: 1_700_000_000_000,
            connection_id: "c1".to_string(),
            text: "hello".to_string(),
        };
        assert_eq!(msg.formatted("Bob"), "#tech Bob: hello");
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let msg = ChatMessage {
            channel: "general".to_string(),
            timestamp: 1,
            connection_id: "c1".to_string(),
            text: "hi".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["connectionId"], "c1");
        assert!(json.get("connection_id").is_none());
    }
}
