//! In-memory record store.
//!
//! Backs the `memory` storage backend and the component tests. Each record
//! lives in one `DashMap` shard entry; holding that entry's lock while an
//! update is applied gives per-record atomicity and nothing more.

use dashmap::DashMap;
use relay_types::error::RepositoryError;

use super::record_store::{Record, RecordKey, RecordStore, RecordUpdate};

/// `DashMap`-backed implementation of `RecordStore`.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: DashMap<RecordKey, Record>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for InMemoryRecordStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, RepositoryError> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &RecordKey, record: Record) -> Result<(), RepositoryError> {
        self.records.insert(key.clone(), record);
        Ok(())
    }

    async fn update(&self, key: &RecordKey, update: RecordUpdate) -> Result<(), RepositoryError> {
        if update.creates_record() {
            let mut entry = self.records.entry(key.clone()).or_default();
            update.apply(entry.value_mut())
        } else if let Some(mut entry) = self.records.get_mut(key) {
            update.apply(entry.value_mut())
        } else {
            Ok(())
        }
    }
}
