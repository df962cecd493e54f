//! Fan-out of one message to every other member of a channel.

pub mod engine;

pub use engine::{BroadcastEngine, BroadcastReport};
