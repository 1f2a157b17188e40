//! Persistence adapters for the profile and task blobs
//!
//! Every blob is written inside a versioned [`Snapshot`] envelope. Blobs saved
//! before the envelope existed are read as schema version 0.

pub mod file;
pub mod memory;
pub mod redis_store;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use chrono::{DateTime, Utc};
use navigator_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current persisted schema version
pub const SCHEMA_VERSION: u32 = 1;

const VERSION_KEY: &str = "schemaVersion";

/// Durable storage for one value
pub trait Store<T> {
    /// Load the stored value, `None` if nothing was saved yet
    fn load(&self) -> Result<Option<T>>;

    /// Replace the stored value
    fn save(&self, value: &T) -> Result<()>;
}

/// Versioned envelope around a persisted value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub data: T,
}

/// Serialize a value inside a current-version envelope
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    let snapshot = Snapshot {
        schema_version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        data: value,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Deserialize an envelope, or a bare legacy value
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let is_envelope = value
        .as_object()
        .is_some_and(|object| object.contains_key(VERSION_KEY));

    if !is_envelope {
        return Ok(serde_json::from_value(value)?);
    }

    let snapshot: Snapshot<T> = serde_json::from_value(value)?;
    if snapshot.schema_version > SCHEMA_VERSION {
        return Err(Error::Storage(format!(
            "schema version {} is newer than supported version {}",
            snapshot.schema_version, SCHEMA_VERSION
        )));
    }
    Ok(snapshot.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_common::{Profile, Relationship, Task};

    #[test]
    fn test_encode_writes_envelope() {
        let json = encode(&vec![1, 2, 3]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_decode_legacy_profile() {
        let json = r#"{ "name": "Sunita", "relationship": "widow", "isProfileComplete": false }"#;
        let profile: Profile = decode(json).unwrap();
        assert_eq!(profile.relationship, Some(Relationship::Widow));
    }

    #[test]
    fn test_decode_legacy_tasks() {
        let json = r#"[{
            "id": "1700000000000-0",
            "title": "Submit Pension Application",
            "status": "pending",
            "category": "pension",
            "deadline": "2024-02-09T00:00:00.000Z",
            "documents": [ { "name": "Death Certificate", "isSubmitted": false } ],
            "createdAt": "2024-01-10T00:00:00Z",
            "updatedAt": "2024-01-10T00:00:00Z"
        }]"#;
        let tasks: Vec<Task> = decode(json).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, navigator_common::TaskStatus::NotStarted);
    }

    #[test]
    fn test_decode_rejects_newer_schema() {
        let json = r#"{ "schemaVersion": 99, "savedAt": "2024-01-10T00:00:00Z", "data": {} }"#;
        let result: Result<Profile> = decode(json);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result: Result<Vec<Task>> = decode("{not json");
        assert!(result.is_err());

        let result: Result<Vec<Task>> = decode(r#"{"tasks": 3}"#);
        assert!(result.is_err());
    }
}
