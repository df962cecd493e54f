//! HTTP surface of the relay.
//!
//! `/ws` carries the chat protocol; `/api/v1/` is a read-only control plane
//! over the channel directory and membership, answering in the envelope
//! response format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
