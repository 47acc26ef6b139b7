//! Redis Store Module
//!
//! Networked adapter over a Redis server using a multiplexed tokio
//! connection. Every command is bounded by the configured timeout.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use tracing::info;

use crate::error::{CacheError, Result};
use crate::store::StoreAdapter;

// == Redis Store ==
/// Adapter speaking to a Redis server.
///
/// `flush_all` issues `FLUSHDB`, which clears every key of the database
/// selected by the connection URL.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisStore {
    // == Connect ==
    /// Opens a connection to `url`, failing if that takes longer than `timeout`.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = bounded(
            timeout,
            "CONNECT",
            client.get_multiplexed_async_connection(),
        )
        .await?;

        info!("Connected to Redis at {}", url);
        Ok(Self { conn, timeout })
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

async fn bounded<T, F>(timeout: Duration, command: &str, fut: F) -> Result<T>
where
    F: Future<Output = RedisResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(CacheError::from),
        Err(_) => Err(CacheError::Timeout(format!(
            "{} did not complete within {:?}",
            command, timeout
        ))),
    }
}

#[async_trait]
impl StoreAdapter for RedisStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, "SET", conn.set::<_, _, ()>(key, value)).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, "GET", conn.get::<_, Option<Vec<u8>>>(key)).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, "INCR", conn.incr::<_, _, i64>(key, 1)).await
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, "RPUSH", conn.rpush::<_, _, usize>(key, value)).await
    }

    async fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        bounded(
            self.timeout,
            "LRANGE",
            conn.lrange::<_, Vec<Vec<u8>>>(key, start as isize, end as isize),
        )
        .await
    }

    async fn record_call(
        &self,
        inputs_key: &str,
        input: &[u8],
        outputs_key: &str,
        output: &[u8],
    ) -> Result<usize> {
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic()
            .rpush(inputs_key, input)
            .rpush(outputs_key, output);

        let transaction = async move {
            let reply: RedisResult<(usize, usize)> = pipe.query_async(&mut conn).await;
            reply
        };
        let (_, recorded) = bounded(self.timeout, "MULTI RPUSH RPUSH", transaction).await?;
        Ok(recorded)
    }

    async fn flush_all(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let flush = async move {
            let reply: RedisResult<()> = redis::cmd("FLUSHDB").query_async(&mut conn).await;
            reply
        };
        bounded(self.timeout, "FLUSHDB", flush).await
    }
}
