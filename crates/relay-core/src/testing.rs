//! Shared test doubles for relay-core.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use relay_types::config::RelayConfig;
use relay_types::error::{DeliveryError, RepositoryError};

use crate::hash::ContentHasher;
use crate::store::{InMemoryRecordStore, Record, RecordKey, RecordStore, RecordUpdate};
use crate::transport::PushGateway;

/// FNV-1a digest rendered as 16 hex chars. Deterministic, no crypto dep.
pub struct FnvHasher;

impl ContentHasher for FnvHasher {
    fn compute_hash(&self, content: &str) -> String {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in content.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        format!("{hash:016x}")
    }
}

/// Hasher that maps every input to the same digest.
pub struct CollidingHasher;

impl ContentHasher for CollidingHasher {
    fn compute_hash(&self, _content: &str) -> String {
        "0000000000000000".to_string()
    }
}

/// Gateway that records every delivery and fails for configured ids.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(String, String)>>,
    gone: Mutex<HashSet<String>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_gone(&self, connection_id: &str) {
        self.gone.lock().unwrap().insert(connection_id.to_string());
    }

    /// All `(connection_id, payload)` pairs delivered so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Payloads delivered to one connection.
    pub fn sent_to(&self, connection_id: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _)| id == connection_id)
            .map(|(_, payload)| payload)
            .collect()
    }

    /// Sorted ids that received at least one delivery.
    pub fn recipients(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sent().into_iter().map(|(id, _)| id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl PushGateway for RecordingGateway {
    async fn post_to_connection(
        &self,
        connection_id: &str,
        payload: &str,
    ) -> Result<(), DeliveryError> {
        if self.gone.lock().unwrap().contains(connection_id) {
            return Err(DeliveryError::Gone(connection_id.to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((connection_id.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Store whose every call fails as if the backend were throttling.
pub struct ThrottledStore;

impl RecordStore for ThrottledStore {
    async fn get(&self, _key: &RecordKey) -> Result<Option<Record>, RepositoryError> {
        Err(RepositoryError::Throttled)
    }

    async fn put(&self, _key: &RecordKey, _record: Record) -> Result<(), RepositoryError> {
        Err(RepositoryError::Throttled)
    }

    async fn update(&self, _key: &RecordKey, _update: RecordUpdate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Throttled)
    }
}

pub fn memory_store() -> Arc<InMemoryRecordStore> {
    Arc::new(InMemoryRecordStore::new())
}

pub fn config() -> Arc<RelayConfig> {
    Arc::new(RelayConfig::default())
}
