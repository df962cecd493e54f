//! Key layout for each record family.
//!
//! Every family except messages uses a constant sort key, so each channel's
//! membership, the directory, and each profile are single records.

use super::record_store::RecordKey;

/// Sort key shared by single-record families.
pub const CONSTANT_SORT: i64 = 0;

/// Partition of the channel directory singleton.
pub const DIRECTORY_PARTITION: &str = "channels";

/// Attribute of the directory record holding the channel name set.
pub const DIRECTORY_ATTRIBUTE: &str = "channels";

/// Membership record for one channel.
pub fn membership(channel: &str) -> RecordKey {
    RecordKey::new(format!("{channel}:::connections"), CONSTANT_SORT)
}

/// The channel directory record.
pub fn directory() -> RecordKey {
    RecordKey::new(DIRECTORY_PARTITION, CONSTANT_SORT)
}

/// Profile record for one connection.
pub fn profile(connection_id: &str) -> RecordKey {
    RecordKey::new(connection_id, CONSTANT_SORT)
}

/// One message in a channel's log, ordered by epoch millis.
pub fn message(channel: &str, timestamp: i64) -> RecordKey {
    RecordKey::new(channel, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_and_message_partitions_differ() {
        assert_eq!(membership("general").partition, "general:::connections");
        assert_eq!(message("general", 17).partition, "general");
        assert_eq!(message("general", 17).sort, 17);
    }

    #[test]
    fn singleton_keys_use_constant_sort() {
        assert_eq!(directory(), RecordKey::new("channels", 0));
        assert_eq!(profile("abc").sort, CONSTANT_SORT);
    }
}
