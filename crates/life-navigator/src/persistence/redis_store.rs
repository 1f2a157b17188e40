//! Redis storage for sessions shared between devices

use super::{decode, encode, Store};
use navigator_common::{Error, Result};
use redis::Commands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Stores a value under a single Redis key
pub struct RedisStore {
    client: redis::Client,
    key: String,
}

impl RedisStore {
    /// Create a store for `navigator:<session>:<blob>`
    pub fn new(redis_url: &str, session: &str, blob: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| Error::Storage(format!("Failed to create Redis client: {}", e)))?;

        info!("Using Redis at {} for session {}", redis_url, session);

        Ok(Self {
            client,
            key: format!("navigator:{}:{}", session, blob),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn connection(&self) -> Result<redis::Connection> {
        self.client
            .get_connection()
            .map_err(|e| Error::Storage(format!("Failed to connect to Redis: {}", e)))
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for RedisStore {
    fn load(&self) -> Result<Option<T>> {
        let mut conn = self.connection()?;
        let json: Option<String> = conn
            .get(&self.key)
            .map_err(|e| Error::Storage(e.to_string()))?;

        match json {
            Some(data) => {
                debug!("Loaded {}", self.key);
                Ok(Some(decode(&data)?))
            }
            None => Ok(None),
        }
    }

    fn save(&self, value: &T) -> Result<()> {
        let json = encode(value)?;
        let mut conn = self.connection()?;
        let _: () = conn
            .set(&self.key, json)
            .map_err(|e| Error::Storage(e.to_string()))?;

        debug!("Saved {}", self.key);
        Ok(())
    }
}
