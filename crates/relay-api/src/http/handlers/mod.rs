//! HTTP and WebSocket request handlers.

pub mod channel;
pub mod ws;
