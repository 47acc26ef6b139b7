//! Store Module
//!
//! The boundary to the external key/value backend. Everything the cache,
//! the instrumentation wrappers and the replay engine persist goes through
//! [`StoreAdapter`].

mod entry;
mod memory;
#[cfg(feature = "redis-backend")]
mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::Entry;
pub use memory::MemoryStore;
#[cfg(feature = "redis-backend")]
pub use redis_store::RedisStore;

// == Store Adapter ==
/// Minimal command set over a Redis-like backend.
///
/// Implementations must make `incr`, `rpush` and `record_call` atomic so
/// concurrent callers never lose a count or interleave a half-written
/// list entry. Failures are reported to the caller; adapters do not retry.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// `SET key value`, unconditional overwrite.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// `GET key`. Returns `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// `INCR key`. An absent key starts at 0, so the first call returns 1.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// `RPUSH key value`. Returns the length of the list after the push.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// `LRANGE key start end`, inclusive on both ends. Negative indices
    /// count from the tail, so `(0, -1)` reads the whole list.
    async fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>>;

    /// Appends `input` to `inputs_key` and `output` to `outputs_key` as one
    /// atomic step, so no other caller's entries land between them and
    /// position *i* of both lists always belongs to the same call.
    /// Returns the length of the outputs list after the push.
    async fn record_call(
        &self,
        inputs_key: &str,
        input: &[u8],
        outputs_key: &str,
        output: &[u8],
    ) -> Result<usize>;

    /// Destroys every key reachable through this adapter.
    async fn flush_all(&self) -> Result<()>;
}
