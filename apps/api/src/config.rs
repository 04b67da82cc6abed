use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where the CV document is persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key under `storage_dir`.
    File,
    /// Process memory only; nothing survives a restart.
    Memory,
    /// A Redis server at `REDIS_URL`.
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage: StorageBackend,
    pub storage_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage = match env_or("STORAGE_BACKEND", "file").to_ascii_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            "redis" => StorageBackend::Redis {
                url: require_env("REDIS_URL")?,
            },
            other => bail!("STORAGE_BACKEND must be one of file, memory, redis (got '{other}')"),
        };

        Ok(Config {
            port: parse_env("PORT", "8080").context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            storage,
            storage_dir: PathBuf::from(env_or("STORAGE_DIR", "./data")),
            export_dir: PathBuf::from(env_or("EXPORT_DIR", "./exports")),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_or(key, default).trim().parse::<T>()?)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
