//! Inbound relay events and their responses.
//!
//! These are the shapes the push gateway hands to the relay, one per unit of
//! work. Every handler answers with a [`RelayResponse`].

use serde::{Deserialize, Serialize};

/// Control-plane requests that are not chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCommand {
    #[serde(rename = "fetchChannels")]
    ListChannels,
}

/// Payload a client sends to issue a [`ControlCommand`].
///
/// `{"action": "command", "data": "fetchChannels"}`
#[derive(Debug, Clone, Deserialize)]
pub struct CommandFrame {
    pub action: String,
    pub data: ControlCommand,
}

impl CommandFrame {
    /// Parse a text frame as a control command, if it is one.
    pub fn parse(text: &str) -> Option<ControlCommand> {
        serde_json::from_str::<CommandFrame>(text)
            .ok()
            .filter(|frame| frame.action == "command")
            .map(|frame| frame.data)
    }
}

/// One inbound event for one connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    Connect {
        connection_id: String,
    },
    Disconnect {
        connection_id: String,
    },
    Message {
        connection_id: String,
        text: String,
        /// Epoch millis assigned by the gateway when the request arrived.
        request_time: i64,
    },
    Command {
        connection_id: String,
        command: ControlCommand,
    },
}

impl InboundEvent {
    pub fn connection_id(&self) -> &str {
        match self {
            InboundEvent::Connect { connection_id }
            | InboundEvent::Disconnect { connection_id }
            | InboundEvent::Message { connection_id, .. }
            | InboundEvent::Command { connection_id, .. } => connection_id,
        }
    }
}

/// Status code plus optional body, as returned to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: None,
        }
    }

    pub fn ok_with(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: Some(body.into()),
        }
    }

    /// Failed invocation, as the gateway reports it to the caller.
    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            body: Some("Internal server error".to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_frame_parses_fetch_channels() {
        let parsed = CommandFrame::parse(r#"{"action":"command","data":"fetchChannels"}"#);
        assert_eq!(parsed, Some(ControlCommand::ListChannels));
    }

    #[test]
    fn test_command_frame_rejects_chat_text() {
        assert_eq!(CommandFrame::parse("hello there"), None);
        assert_eq!(CommandFrame::parse(r#"{"action":"other","data":"fetchChannels"}"#), None);
        assert_eq!(CommandFrame::parse(r#"{"action":"command","data":"reboot"}"#), None);
    }

    #[test]
    fn test_inbound_event_tagging() {
        let event = InboundEvent::Message {
            connection_id: "c1".to_string(),
            text: "hi".to_string(),
            request_time: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(event.connection_id(), "c1");
    }

    #[test]
    fn test_ok_response_omits_body() {
        let json = serde_json::to_string(&RelayResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status_code":200}"#);
    }

    #[test]
    fn test_internal_error_is_not_success() {
        let response = RelayResponse::internal_error();
        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());
        assert!(RelayResponse::ok_with("name").is_success());
    }
}
