use async_trait::async_trait;
use leafy_core::backend::{LinkBackend, ReadBackend};
use leafy_core::error::{Result, StorageError};
use leafy_core::{LinkCode, LinkRecord};
use redis::AsyncCommands;
use tracing::{debug, trace, warn};

pub const DEFAULT_KEY_PREFIX: &str = "leafy:link:";

/// Backend storing links in a Redis server.
///
/// Each link is a plain string key `<prefix><code>` holding the destination.
/// Creation uses `SETNX`, so the existence check and the write are a single
/// atomic command on the server. With an empty prefix the keys are the bare
/// codes.
#[derive(Clone)]
pub struct RedisBackend {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

impl RedisBackend {
    /// Creates a backend over an existing connection with the default prefix.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a backend over an existing connection with a custom key prefix.
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a multiplexed connection to `redis_url`.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to redis", e))?;
        Ok(Self::with_prefix(conn, key_prefix))
    }

    fn key(&self, code: &LinkCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

#[async_trait]
impl ReadBackend for RedisBackend {
    async fn get(&self, code: &LinkCode) -> Result<Option<String>> {
        let key = self.key(code);
        trace!(code = %code, "fetching link from redis");

        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            warn!(code = %code, error = %e, "redis error on get");
            map_redis_error("failed to fetch link from redis", e)
        })
    }
}

#[async_trait]
impl LinkBackend for RedisBackend {
    async fn set_if_absent(&self, record: &LinkRecord) -> Result<bool> {
        let key = self.key(&record.code);

        let mut conn = self.conn.clone();
        let stored = conn
            .set_nx::<_, _, bool>(&key, record.destination.as_str())
            .await
            .map_err(|e| {
                warn!(code = %record.code, error = %e, "redis error on setnx");
                map_redis_error("failed to store link in redis", e)
            })?;

        debug!(code = %record.code, stored, "redis setnx completed");
        Ok(stored)
    }
}
