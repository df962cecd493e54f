//! Per-connection identity (channel and display name).

pub mod store;

pub use store::ProfileStore;
