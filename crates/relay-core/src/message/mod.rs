//! Append-only per-channel message history.

pub mod log;

pub use log::MessageLog;
