//! Channel membership: who is in which channel, and which channels exist.
//!
//! - `key` -- derived membership keys (truncated digest of a connection id)
//! - `registry` -- `MembershipRegistry` with join/leave/list over the store
//! - `channel_move` -- the non-atomic leave/update/join sequence

pub mod channel_move;
pub mod key;
pub mod registry;

pub use channel_move::{ChannelMove, move_channel};
pub use registry::MembershipRegistry;
