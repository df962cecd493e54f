//! Infrastructure layer for the channel relay.
//!
//! Contains implementations of the ports defined in `relay-core`: SQLite
//! record storage, SHA-256 membership key hashing, config file loading and
//! data directory resolution.

pub mod backend;
pub mod config;
pub mod crypto;
pub mod sqlite;
