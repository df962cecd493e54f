//! Record store abstractions.
//!
//! Defines the `RecordStore` trait, the key layout of each record family,
//! and an in-memory implementation. The SQLite implementation lives in
//! relay-infra.

pub mod keys;
pub mod memory;
pub mod record_store;

pub use memory::InMemoryRecordStore;
pub use record_store::{Record, RecordKey, RecordStore, RecordUpdate};
