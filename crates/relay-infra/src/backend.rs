//! Runtime selection of the record store backend.
//!
//! Services are generic over `RecordStore`; the binary needs one concrete
//! type regardless of which backend the config names, so this enum
//! dispatches to either implementation.

use std::path::Path;

use relay_core::store::{InMemoryRecordStore, Record, RecordKey, RecordStore, RecordUpdate};
use relay_types::config::StorageBackend;
use relay_types::error::RepositoryError;

use crate::sqlite::{DatabasePool, SqliteRecordStore, pool::database_url};

/// Either record store implementation.
pub enum RecordBackend {
    Memory(InMemoryRecordStore),
    Sqlite(SqliteRecordStore),
}

impl RecordBackend {
    /// Open the configured backend. SQLite lives at `{data_dir}/relay.db`.
    pub async fn open(backend: StorageBackend, data_dir: &Path) -> Result<Self, sqlx::Error> {
        match backend {
            StorageBackend::Memory => Ok(Self::Memory(InMemoryRecordStore::new())),
            StorageBackend::Sqlite => {
                let pool = DatabasePool::new(&database_url(data_dir)).await?;
                Ok(Self::Sqlite(SqliteRecordStore::new(pool)))
            }
        }
    }

    pub fn kind(&self) -> StorageBackend {
        match self {
            Self::Memory(_) => StorageBackend::Memory,
            Self::Sqlite(_) => StorageBackend::Sqlite,
        }
    }
}

impl RecordStore for RecordBackend {
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, RepositoryError> {
        match self {
            Self::Memory(store) => store.get(key).await,
            Self::Sqlite(store) => store.get(key).await,
        }
    }

    async fn put(&self, key: &RecordKey, record: Record) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(store) => store.put(key, record).await,
            Self::Sqlite(store) => store.put(key, record).await,
        }
    }

    async fn update(&self, key: &RecordKey, update: RecordUpdate) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(store) => store.update(key, update).await,
            Self::Sqlite(store) => store.update(key, update).await,
        }
    }
}
