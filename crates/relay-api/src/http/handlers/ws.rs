//! WebSocket chat endpoint.
//!
//! `GET /ws` upgrades to a socket that plays the push gateway's role for one
//! client: it assigns the connection id, turns frames into inbound events for
//! the session controller and drains the connection's outbound queue back to
//! the client.
//!
//! A text frame of the form `{"action":"command","data":"fetchChannels"}` is a
//! control command. Every other text frame is chat text.

use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use relay_core::session::SessionState;
use relay_types::event::{CommandFrame, InboundEvent, RelayResponse};

use crate::state::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// GET /ws - Upgrade to a chat socket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection from connect to disconnect.
///
/// Single `tokio::select!` loop over heartbeat, the outbound queue and
/// incoming frames.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let connection_id = Uuid::now_v7().to_string();
    let mut outbound = state.gateway.register(&connection_id);
    let mut session = SessionState::default();

    let connect = InboundEvent::Connect {
        connection_id: connection_id.clone(),
    };
    match dispatch(&state, &mut session, &connect).await {
        Some(response) if response.is_success() => {}
        Some(response) => {
            let _ = socket.send(Message::Text(error_frame(&response).into())).await;
            state.gateway.unregister(&connection_id);
            return;
        }
        None => {
            state.gateway.unregister(&connection_id);
            return;
        }
    }

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);

    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                if ws_sender.send(Message::Ping(Default::default())).await.is_err() {
                    break;
                }
            }

            Some(payload) = outbound.recv() => {
                if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }

            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        let event = inbound_event(&connection_id, text.as_str(), Utc::now().timestamp_millis());
                        let response = dispatch(&state, &mut session, &event).await;

                        if let Some(frame) = response.and_then(|r| reply_frame(&event, r)) {
                            if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(%connection_id, "WebSocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let disconnect = InboundEvent::Disconnect {
        connection_id: connection_id.clone(),
    };
    dispatch(&state, &mut session, &disconnect).await;
    state.gateway.unregister(&connection_id);
    tracing::debug!(%connection_id, "WebSocket connection closed");
}

/// Classify one text frame.
fn inbound_event(connection_id: &str, text: &str, request_time: i64) -> InboundEvent {
    match CommandFrame::parse(text) {
        Some(command) => InboundEvent::Command {
            connection_id: connection_id.to_string(),
            command,
        },
        None => InboundEvent::Message {
            connection_id: connection_id.to_string(),
            text: text.to_string(),
            request_time,
        },
    }
}

/// Frame sent back to the sender for one handled event, if any.
///
/// A failed invocation always answers with an error frame. On success only
/// relayed chat text is acknowledged; slash commands already replied through
/// the gateway.
fn reply_frame(event: &InboundEvent, response: RelayResponse) -> Option<String> {
    if !response.is_success() {
        return Some(error_frame(&response));
    }
    match event {
        InboundEvent::Message { text, .. } if !text.starts_with('/') => response.body,
        _ => None,
    }
}

/// `{"message": ..., "statusCode": ...}` for a failed invocation.
fn error_frame(response: &RelayResponse) -> String {
    serde_json::json!({
        "message": response.body.as_deref().unwrap_or_default(),
        "statusCode": response.status_code,
    })
    .to_string()
}

/// Hand an event to the controller if the session accepts it.
///
/// Returns `None` for a rejected event. A controller error comes back as a
/// failed [`RelayResponse`] and leaves the session state unchanged.
async fn dispatch(
    state: &AppState,
    session: &mut SessionState,
    event: &InboundEvent,
) -> Option<RelayResponse> {
    let connection_id = event.connection_id();
    if !session.accepts(event) {
        tracing::warn!(%connection_id, ?session, "event rejected in current session state");
        return None;
    }

    match state.controller.handle(event).await {
        Ok(response) => {
            *session = session.advance(event);
            Some(response)
        }
        Err(err) => {
            tracing::error!(%connection_id, "relay event failed: {err}");
            Some(RelayResponse::internal_error())
        }
    }
}
