use std::{env, fmt, num::NonZeroUsize, str::FromStr};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "./reviews.db";
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where accepted reviews live besides process memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    Memory,
    Sqlite { path: String },
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Memory => write!(f, "memory"),
            StorageMode::Sqlite { path } => write!(f, "sqlite ({path})"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageMode,
    pub max_body_bytes: usize,
    pub workers: Option<NonZeroUsize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage: StorageMode::Sqlite {
                path: DEFAULT_DB_PATH.to_string(),
            },
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            workers: None,
        }
    }
}

impl Config {
    // In-memory variant, nothing touches disk
    pub fn memory() -> Self {
        Self {
            storage: StorageMode::Memory,
            ..Self::default()
        }
    }

    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            storage: StorageMode::Sqlite { path: path.into() },
            ..Self::default()
        }
    }

    /// Read the process environment, falling back to defaults for unset keys.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = try_load(&lookup, "REVIEWS_HOST", DEFAULT_HOST.to_string())?;
        let port = try_load(&lookup, "REVIEWS_PORT", DEFAULT_PORT)?;
        let db_path = try_load(&lookup, "REVIEWS_DB_PATH", DEFAULT_DB_PATH.to_string())?;
        let mode = try_load(&lookup, "REVIEWS_STORAGE", "sqlite".to_string())?;
        // Zero would reject every POST, or leave the server without workers
        let max_body_bytes = match lookup("REVIEWS_MAX_BODY_BYTES") {
            Some(raw) => parse::<NonZeroUsize>("REVIEWS_MAX_BODY_BYTES", &raw)?.get(),
            None => {
                info!("REVIEWS_MAX_BODY_BYTES not set, using default: {DEFAULT_MAX_BODY_BYTES}");
                DEFAULT_MAX_BODY_BYTES
            }
        };
        let workers = match lookup("REVIEWS_WORKERS") {
            Some(raw) => Some(parse("REVIEWS_WORKERS", &raw)?),
            None => None,
        };

        let storage = match mode.to_ascii_lowercase().as_str() {
            "memory" => StorageMode::Memory,
            "sqlite" => StorageMode::Sqlite { path: db_path },
            _ => {
                return Err(ConfigError::Invalid {
                    key: "REVIEWS_STORAGE",
                    value: mode,
                    reason: "expected `memory` or `sqlite`".to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            storage,
            max_body_bytes,
            workers,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => parse(key, &raw),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
