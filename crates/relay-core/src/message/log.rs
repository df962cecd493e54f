//! Message log over the record store.
//!
//! One record per message, partitioned by channel and sorted by the
//! originating request's epoch millis. Two messages in one channel with the
//! same timestamp land on the same key and the later write wins.

use std::sync::Arc;

use relay_types::error::RepositoryError;
use relay_types::message::ChatMessage;
use serde_json::Value;

use crate::store::{RecordStore, keys};

/// Appends chat messages to the store.
pub struct MessageLog<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> MessageLog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn append(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let Value::Object(record) = serde_json::to_value(message)
            .map_err(|e| RepositoryError::Malformed(format!("message: {e}")))?
        else {
            return Err(RepositoryError::Malformed(
                "message did not serialize to an object".to_string(),
            ));
        };

        self.store
            .put(&keys::message(&message.channel, message.timestamp), record)
            .await
    }

    /// Point read of one logged message.
    pub async fn get(
        &self,
        channel: &str,
        timestamp: i64,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        match self.store.get(&keys::message(channel, timestamp)).await? {
            Some(record) => serde_json::from_value(Value::Object(record))
                .map(Some)
                .map_err(|e| RepositoryError::Malformed(format!("message: {e}"))),
            None => Ok(None),
        }
    }
}
