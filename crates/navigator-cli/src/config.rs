//! Configuration management for the navigator CLI
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Widest accepted "upcoming" window, ten years
pub const MAX_UPCOMING_DAYS: i64 = 3650;

/// Where the profile and task blobs live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => anyhow::bail!("NAVIGATOR_STORE must be file, memory or redis, got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreBackend::File => "file",
            StoreBackend::Memory => "memory",
            StoreBackend::Redis => "redis",
        };
        f.write_str(name)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Persistence backend
    pub backend: StoreBackend,

    /// Directory holding profile.json and tasks.json
    pub data_dir: PathBuf,

    /// Redis connection URL
    pub redis_url: String,

    /// Session namespace for Redis keys
    pub session: String,

    /// Optional eligibility rule file replacing the built-in rules
    pub rules_file: Option<PathBuf>,

    /// Width of the "upcoming" timeline bucket in days
    pub upcoming_days: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            backend: lookup("NAVIGATOR_STORE")
                .unwrap_or_else(|| "file".to_string())
                .parse()?,

            data_dir: lookup("NAVIGATOR_DATA_DIR")
                .unwrap_or_else(|| "./data".to_string())
                .into(),

            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),

            session: lookup("NAVIGATOR_SESSION").unwrap_or_else(|| "default".to_string()),

            rules_file: lookup("NAVIGATOR_RULES_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),

            upcoming_days: lookup("NAVIGATOR_UPCOMING_DAYS")
                .unwrap_or_else(|| "7".to_string())
                .parse()
                .context("Invalid NAVIGATOR_UPCOMING_DAYS")?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.upcoming_days <= 0 {
            anyhow::bail!("NAVIGATOR_UPCOMING_DAYS must be greater than 0");
        }

        if self.upcoming_days > MAX_UPCOMING_DAYS {
            anyhow::bail!(
                "NAVIGATOR_UPCOMING_DAYS must be at most {}",
                MAX_UPCOMING_DAYS
            );
        }

        if self.session.trim().is_empty() {
            anyhow::bail!("NAVIGATOR_SESSION cannot be empty");
        }

        Ok(())
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }
}
