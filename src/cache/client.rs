//! Cache Client Module
//!
//! Stores payloads under generated keys and reads them back, with the
//! `store` operation instrumented for call counting and history.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::Payload;
use crate::error::{CacheError, Result};
use crate::instrument::{CallHistory, CountCalls, Operation};
use crate::replay::{self, Trace};
use crate::store::StoreAdapter;

/// Identity under which `Cache::store` calls are counted and recorded.
pub const STORE_IDENTITY: &str = "Cache.store";

// == Store Payload Operation ==
/// The uninstrumented store: fresh v4 UUID key, canonical encoding, `SET`.
pub struct StorePayload {
    store: Arc<dyn StoreAdapter>,
}

impl StorePayload {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Operation for StorePayload {
    type Input = Payload;
    type Output = String;

    fn identity(&self) -> &str {
        STORE_IDENTITY
    }

    async fn invoke(&self, payload: Payload) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &payload.encode()).await?;
        debug!(key = %key, "stored payload");
        Ok(key)
    }
}

// == Cache ==
/// Cache client over an injected store adapter.
pub struct Cache {
    store: Arc<dyn StoreAdapter>,
    store_op: Box<dyn Operation<Input = Payload, Output = String>>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache and flushes the backing store.
    ///
    /// Every key, counter and history reachable through `store` is gone
    /// once this returns.
    pub async fn new(store: Arc<dyn StoreAdapter>) -> Result<Self> {
        store.flush_all().await?;
        info!("Backing store flushed");

        let store_op = CountCalls::new(
            CallHistory::new(StorePayload::new(store.clone()), store.clone()),
            store.clone(),
        );

        Ok(Self {
            store,
            store_op: Box::new(store_op),
        })
    }

    // == Store ==
    /// Stores `payload` under a freshly generated key and returns the key.
    pub async fn store(&self, payload: impl Into<Payload>) -> Result<String> {
        self.store_op.invoke(payload.into()).await
    }

    // == Retrieve ==
    /// Returns the raw bytes under `key`, or `None` if the key is absent.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    // == Retrieve With ==
    /// Applies `convert` to the raw bytes under `key` when present.
    pub async fn retrieve_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> T,
    {
        Ok(self.retrieve(key).await?.map(convert))
    }

    // == Retrieve As Text ==
    /// Returns the value under `key` decoded as UTF-8.
    ///
    /// The caller vouches the key was stored as text, so invalid UTF-8 is
    /// a `CacheError::Decode` rather than a default.
    pub async fn retrieve_as_text(&self, key: &str) -> Result<Option<String>> {
        match self.retrieve_with(key, String::from_utf8).await? {
            Some(Ok(text)) => Ok(Some(text)),
            Some(Err(err)) => Err(CacheError::Decode(format!(
                "value at '{}' is not valid UTF-8: {}",
                key, err
            ))),
            None => Ok(None),
        }
    }

    // == Retrieve As Integer ==
    /// Returns the value under `key` parsed as an integer, or 0 if the key
    /// is absent or its bytes are not a decimal integer.
    pub async fn retrieve_as_integer(&self, key: &str) -> Result<i64> {
        Ok(self
            .retrieve_with(key, |bytes| parse_lenient(&bytes))
            .await?
            .flatten()
            .unwrap_or(0))
    }

    // == Retrieve As Float ==
    /// Float counterpart of [`Cache::retrieve_as_integer`]; defaults to 0.0.
    pub async fn retrieve_as_float(&self, key: &str) -> Result<f64> {
        Ok(self
            .retrieve_with(key, |bytes| parse_lenient(&bytes))
            .await?
            .flatten()
            .unwrap_or(0.0))
    }

    // == Replay ==
    /// Reads back the call trace recorded for `identity`.
    pub async fn replay(&self, identity: &str) -> Result<Trace> {
        replay::replay(self.store.as_ref(), identity).await
    }
}

fn parse_lenient<T: std::str::FromStr>(bytes: &[u8]) -> Option<T> {
    std::str::from_utf8(bytes).ok()?.trim().parse().ok()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn new_cache() -> (Arc<MemoryStore>, Cache) {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).await.unwrap();
        (store, cache)
    }

    #[tokio::test]
    async fn test_new_flushes_store() {
        let store = Arc::new(MemoryStore::new());
        store.set("stale", b"value").await.unwrap();
        store.incr(STORE_IDENTITY).await.unwrap();

        let _cache = Cache::new(store.clone()).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_text() {
        let (_, cache) = new_cache().await;

        let key = cache.store("foo").await.unwrap();
        assert_eq!(cache.retrieve(&key).await.unwrap(), Some(b"foo".to_vec()));
        assert_eq!(
            cache.retrieve_as_text(&key).await.unwrap(),
            Some("foo".to_string())
        );
    }

    #[tokio::test]
    async fn test_store_integer() {
        let (_, cache) = new_cache().await;

        let key = cache.store(42i64).await.unwrap();
        assert_eq!(cache.retrieve_as_integer(&key).await.unwrap(), 42);
        assert_eq!(
            cache.retrieve_as_text(&key).await.unwrap(),
            Some("42".to_string())
        );
    }

    #[tokio::test]
    async fn test_store_float() {
        let (_, cache) = new_cache().await;

        let key = cache.store(2.5f64).await.unwrap();
        assert_eq!(cache.retrieve_as_float(&key).await.unwrap(), 2.5);
    }

    #[tokio::test]
    async fn test_store_bytes_round_trip() {
        let (_, cache) = new_cache().await;
        let raw = vec![0u8, 159, 146, 150, 255];

        let key = cache.store(raw.clone()).await.unwrap();
        assert_eq!(cache.retrieve(&key).await.unwrap(), Some(raw));
    }

    #[tokio::test]
    async fn test_keys_are_unique() {
        let (_, cache) = new_cache().await;

        let k1 = cache.store("same").await.unwrap();
        let k2 = cache.store("same").await.unwrap();
        assert_ne!(k1, k2);
        assert!(Uuid::parse_str(&k1).is_ok());
    }

    #[tokio::test]
    async fn test_retrieve_absent() {
        let (_, cache) = new_cache().await;

        assert_eq!(cache.retrieve("missing").await.unwrap(), None);
        assert_eq!(cache.retrieve_as_text("missing").await.unwrap(), None);
        assert_eq!(cache.retrieve_as_integer("missing").await.unwrap(), 0);
        assert_eq!(cache.retrieve_as_float("missing").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_retrieve_with_converter() {
        let (_, cache) = new_cache().await;

        let key = cache.store("hello").await.unwrap();
        let len = cache.retrieve_with(&key, |bytes| bytes.len()).await.unwrap();
        assert_eq!(len, Some(5));

        let missing = cache.retrieve_with("missing", |bytes| bytes.len()).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_integer_is_lenient() {
        let (_, cache) = new_cache().await;

        let text = cache.store("not a number").await.unwrap();
        let binary = cache.store(vec![0xffu8, 0xfe]).await.unwrap();
        assert_eq!(cache.retrieve_as_integer(&text).await.unwrap(), 0);
        assert_eq!(cache.retrieve_as_integer(&binary).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_text_decode_is_a_fault() {
        let (_, cache) = new_cache().await;

        let key = cache.store(vec![0xffu8, 0xfe]).await.unwrap();
        assert!(matches!(
            cache.retrieve_as_text(&key).await,
            Err(CacheError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_store_is_instrumented() {
        let (store, cache) = new_cache().await;

        let k1 = cache.store("a").await.unwrap();
        let k2 = cache.store("b").await.unwrap();

        assert_eq!(store.get(STORE_IDENTITY).await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(
            store.lrange("Cache.store:outputs", 0, -1).await.unwrap(),
            vec![k1.into_bytes(), k2.into_bytes()]
        );
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let (store, cache) = new_cache().await;
        // Occupy the history list key with a plain value so RPUSH fails.
        store.set("Cache.store:inputs", b"x").await.unwrap();

        assert!(matches!(
            cache.store("a").await,
            Err(CacheError::WrongType(_))
        ));
    }
}
