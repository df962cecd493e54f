//! Record store trait.
//!
//! A record is a JSON object of named attributes addressed by a
//! `(partition, sort)` key. The store offers point reads, whole-record
//! writes, and single-record atomic updates. There are no multi-record
//! transactions and no secondary indexes.

use std::collections::BTreeSet;

use relay_types::error::RepositoryError;
use serde_json::Value;

/// A record body: attribute name -> value.
pub type Record = serde_json::Map<String, Value>;

/// Primary key of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub partition: String,
    pub sort: i64,
}

impl RecordKey {
    pub fn new(partition: impl Into<String>, sort: i64) -> Self {
        Self {
            partition: partition.into(),
            sort,
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.partition, self.sort)
    }
}

/// A single-record mutation, applied atomically by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordUpdate {
    /// Set one attribute, creating the record if needed.
    Set { attribute: String, value: Value },
    /// Remove one attribute. No-op if the record or attribute is absent.
    Remove { attribute: String },
    /// Union strings into a set-valued attribute, creating it if needed.
    AddToSet {
        attribute: String,
        values: Vec<String>,
    },
}

impl RecordUpdate {
    /// Whether applying this update to an absent record should create it.
    pub fn creates_record(&self) -> bool {
        !matches!(self, RecordUpdate::Remove { .. })
    }

    /// Apply the update to a record in place.
    ///
    /// Set-valued attributes are stored as sorted, deduplicated string arrays.
    pub fn apply(self, record: &mut Record) -> Result<(), RepositoryError> {
        match self {
            RecordUpdate::Set { attribute, value } => {
                record.insert(attribute, value);
            }
            RecordUpdate::Remove { attribute } => {
                record.remove(&attribute);
            }
            RecordUpdate::AddToSet { attribute, values } => {
                let mut set = match record.get(&attribute) {
                    None => BTreeSet::new(),
                    Some(existing) => string_set(&attribute, existing)?,
                };
                set.extend(values);
                let array = set.into_iter().map(Value::String).collect();
                record.insert(attribute, Value::Array(array));
            }
        }
        Ok(())
    }
}

fn string_set(attribute: &str, value: &Value) -> Result<BTreeSet<String>, RepositoryError> {
    let Value::Array(items) = value else {
        return Err(RepositoryError::Malformed(format!(
            "attribute '{attribute}' is not a set"
        )));
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                RepositoryError::Malformed(format!(
                    "attribute '{attribute}' contains a non-string member"
                ))
            })
        })
        .collect()
}

/// Trait for the shared record store.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations: `InMemoryRecordStore` here, `SqliteRecordStore` in
/// relay-infra.
pub trait RecordStore: Send + Sync {
    /// Read a whole record. Returns None if it does not exist.
    fn get(
        &self,
        key: &RecordKey,
    ) -> impl std::future::Future<Output = Result<Option<Record>, RepositoryError>> + Send;

    /// Write a whole record, replacing any existing one.
    fn put(
        &self,
        key: &RecordKey,
        record: Record,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Atomically apply one update to one record.
    fn update(
        &self,
        key: &RecordKey,
        update: RecordUpdate,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_remove() {
        let mut record = Record::new();
        RecordUpdate::Set {
            attribute: "a".to_string(),
            value: json!(1),
        }
        .apply(&mut record)
        .unwrap();
        assert_eq!(record.get("a"), Some(&json!(1)));

        RecordUpdate::Remove {
            attribute: "a".to_string(),
        }
        .apply(&mut record)
        .unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_add_to_set_unions_and_sorts() {
        let mut record = Record::new();
        for values in [vec!["foo"], vec!["bar"], vec!["foo", "baz"]] {
            RecordUpdate::AddToSet {
                attribute: "channels".to_string(),
                values: values.into_iter().map(String::from).collect(),
            }
            .apply(&mut record)
            .unwrap();
        }
        assert_eq!(record["channels"], json!(["bar", "baz", "foo"]));
    }

    #[test]
    fn test_add_to_set_rejects_non_set_attribute() {
        let mut record = Record::new();
        record.insert("channels".to_string(), json!("general"));
        let result = RecordUpdate::AddToSet {
            attribute: "channels".to_string(),
            values: vec!["x".to_string()],
        }
        .apply(&mut record);
        assert!(matches!(result, Err(RepositoryError::Malformed(_))));
    }

    #[test]
    fn test_remove_does_not_create() {
        let remove = RecordUpdate::Remove {
            attribute: "a".to_string(),
        };
        assert!(!remove.creates_record());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(RecordKey::new("channels", 0).to_string(), "channels@0");
    }
}
