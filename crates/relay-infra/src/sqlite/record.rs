//! SQLite record store implementation.
//!
//! Implements `RecordStore` from `relay-core` using sqlx with split read/write
//! pools. Record bodies are stored as JSON text. Updates are a
//! read-modify-write inside one transaction on the single-connection writer
//! pool, so they are atomic per record and serialized across records.

use chrono::Utc;
use relay_core::store::{Record, RecordKey, RecordStore, RecordUpdate};
use relay_types::error::RepositoryError;
use serde_json::Value;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `RecordStore`.
pub struct SqliteRecordStore {
    pool: DatabasePool,
}

impl SqliteRecordStore {
    /// Create a new record store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}

fn decode_body(key: &RecordKey, body: &str) -> Result<Record, RepositoryError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(RepositoryError::Malformed(format!(
            "record {key} is not a JSON object"
        ))),
        Err(e) => Err(RepositoryError::Malformed(format!("record {key}: {e}"))),
    }
}

fn encode_body(record: &Record) -> Result<String, RepositoryError> {
    serde_json::to_string(record)
        .map_err(|e| RepositoryError::Malformed(format!("failed to serialize record: {e}")))
}

const UPSERT: &str = r#"INSERT INTO records (partition_key, sort_key, body, updated_at)
   VALUES (?, ?, ?, ?)
   ON CONFLICT (partition_key, sort_key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at"#;

const SELECT_BODY: &str = "SELECT body FROM records WHERE partition_key = ? AND sort_key = ?";

// ---------------------------------------------------------------------------
// RecordStore implementation
// ---------------------------------------------------------------------------

impl RecordStore for SqliteRecordStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, RepositoryError> {
        let row = sqlx::query(SELECT_BODY)
            .bind(&key.partition)
            .bind(key.sort)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let body: String = row.try_get("body").map_err(query_error)?;
                Ok(Some(decode_body(key, &body)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &RecordKey, record: Record) -> Result<(), RepositoryError> {
        let body = encode_body(&record)?;

        sqlx::query(UPSERT)
            .bind(&key.partition)
            .bind(key.sort)
            .bind(&body)
            .bind(now_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn update(&self, key: &RecordKey, update: RecordUpdate) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let row = sqlx::query(SELECT_BODY)
            .bind(&key.partition)
            .bind(key.sort)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let mut record = match row {
            Some(row) => {
                let body: String = row.try_get("body").map_err(query_error)?;
                decode_body(key, &body)?
            }
            None if update.creates_record() => Record::new(),
            None => return tx.commit().await.map_err(query_error),
        };

        update.apply(&mut record)?;

        sqlx::query(UPSERT)
            .bind(&key.partition)
            .bind(key.sort)
            .bind(encode_body(&record)?)
            .bind(now_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(query_error)
    }
}
