//! Session state machine.
//!
//! `Unbound -> Active -> Terminated`. Connect joins the default channel
//! immediately, so `Unbound` is only observable before the connect event has
//! been handled.

use relay_types::event::InboundEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unbound,
    Active,
    Terminated,
}

impl SessionState {
    /// Whether `event` may be handled in this state.
    pub fn accepts(&self, event: &InboundEvent) -> bool {
        match (self, event) {
            (SessionState::Unbound, InboundEvent::Connect { .. }) => true,
            (SessionState::Active, InboundEvent::Connect { .. }) => false,
            (SessionState::Active, _) => true,
            _ => false,
        }
    }

    /// State after `event` was handled successfully.
    pub fn advance(self, event: &InboundEvent) -> Self {
        match event {
            InboundEvent::Connect { .. } if self == SessionState::Unbound => SessionState::Active,
            InboundEvent::Disconnect { .. } => SessionState::Terminated,
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_types::event::ControlCommand;

    fn connect() -> InboundEvent {
        InboundEvent::Connect {
            connection_id: "c1".to_string(),
        }
    }

    fn disconnect() -> InboundEvent {
        InboundEvent::Disconnect {
            connection_id: "c1".to_string(),
        }
    }

    fn message() -> InboundEvent {
        InboundEvent::Message {
            connection_id: "c1".to_string(),
            text: "hi".to_string(),
            request_time: 1,
        }
    }

    #[test]
    fn full_lifecycle() {
        let state = SessionState::default();
        assert!(state.accepts(&connect()));
        assert!(!state.accepts(&message()));

        let state = state.advance(&connect());
        assert_eq!(state, SessionState::Active);
        assert!(state.accepts(&message()));
        assert!(state.accepts(&InboundEvent::Command {
            connection_id: "c1".to_string(),
            command: ControlCommand::ListChannels,
        }));
        assert!(!state.accepts(&connect()));

        let state = state.advance(&message()).advance(&disconnect());
        assert_eq!(state, SessionState::Terminated);
        assert!(!state.accepts(&message()));
        assert!(!state.accepts(&disconnect()));
    }
}
