//! Shared domain types for the channel relay.
//!
//! This crate contains the types passed between every layer of the relay:
//! channel membership, user profiles, chat messages, inbound events, and
//! their associated error and configuration types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod channel;
pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod profile;
