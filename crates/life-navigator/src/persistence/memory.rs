//! In-process storage, mainly for tests

use super::{decode, encode, Store};
use navigator_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Keeps the serialized blob in memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary stored string, e.g. a legacy or corrupt blob
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(json.into()))),
        }
    }

    /// The currently stored string
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for MemoryStore {
    fn load(&self) -> Result<Option<T>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        let value = slot.as_deref().map(decode).transpose()?;
        Ok(value)
    }

    fn save(&self, value: &T) -> Result<()> {
        let json = encode(value)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        *slot = Some(json);
        Ok(())
    }
}
