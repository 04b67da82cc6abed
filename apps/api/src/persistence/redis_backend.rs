//! Redis-backed storage for deployments that run more than one editor process.

use std::time::Duration;

use parking_lot::Mutex;
use redis::{Client, Commands, Connection, RedisResult};

use super::{StateStorage, StorageError};

/// Upper bound for connecting and for each command round trip.
const IO_TIMEOUT: Duration = Duration::from_secs(2);

/// Stores each key as a plain Redis string under `prefix:key`.
///
/// One connection is opened lazily and reused; a failed command drops it so
/// the next call reconnects.
pub struct RedisStorage {
    client: Client,
    prefix: String,
    conn: Mutex<Option<Connection>>,
}

impl RedisStorage {
    pub fn new(redis_url: &str, prefix: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            prefix: prefix.into(),
            conn: Mutex::new(None),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{key}", self.prefix)
        }
    }

    fn connect(&self) -> RedisResult<Connection> {
        let conn = self.client.get_connection_with_timeout(IO_TIMEOUT)?;
        conn.set_read_timeout(Some(IO_TIMEOUT))?;
        conn.set_write_timeout(Some(IO_TIMEOUT))?;
        Ok(conn)
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> RedisResult<T>,
    ) -> Result<T, StorageError> {
        let mut slot = self.conn.lock();
        let mut conn = match slot.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };
        let result = f(&mut conn);
        if result.is_ok() {
            *slot = Some(conn);
        }
        Ok(result?)
    }
}

impl StateStorage for RedisStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = self.namespaced(key);
        self.with_connection(|conn| conn.get::<_, Option<String>>(&key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = self.namespaced(key);
        self.with_connection(|conn| conn.set::<_, _, ()>(&key, value))
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_prefixed() {
        let storage = RedisStorage::new("redis://127.0.0.1/", "cv").unwrap();
        assert_eq!(storage.namespaced("cv-builder-storage"), "cv:cv-builder-storage");
        let bare = RedisStorage::new("redis://127.0.0.1/", "").unwrap();
        assert_eq!(bare.namespaced("k"), "k");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RedisStorage::new("not a url", "cv").is_err());
    }

    #[test]
    fn test_no_connection_until_first_command() {
        let storage = RedisStorage::new("redis://127.0.0.1:1/", "cv").unwrap();
        assert!(storage.conn.lock().is_none());
    }

    #[test]
    fn test_unreachable_server_fails_and_keeps_no_connection() {
        let storage = RedisStorage::new("redis://127.0.0.1:1/", "cv").unwrap();
        assert!(storage.get_item("cv-builder-storage").is_err());
        assert!(storage.conn.lock().is_none());
    }
}
