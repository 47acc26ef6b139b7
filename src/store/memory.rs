//! In-Memory Store Module
//!
//! A process-local keyspace with Redis command semantics, used as the
//! `memory` backend and as the test double for every other module.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{Entry, StoreAdapter};

// == Memory Store ==
/// Keyspace guarded by a single lock; every command takes it once, which
/// makes `incr` and `rpush` atomic with respect to concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty keyspace.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no keys are held.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Entry::Bytes(value.to_vec()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => Ok(Some(entry.bytes(key)?.to_vec())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Bytes(b"0".to_vec()))
            .increment(key)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
            .push(key, value)
    }

    async fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => entry.range(key, start, end),
            None => Ok(Vec::new()),
        }
    }

    async fn record_call(
        &self,
        inputs_key: &str,
        input: &[u8],
        outputs_key: &str,
        output: &[u8],
    ) -> Result<usize> {
        let mut entries = self.entries.write().await;

        // Both slots are checked first so a type error leaves neither list changed.
        for key in [inputs_key, outputs_key] {
            if let Some(entry) = entries.get(key) {
                entry.ensure_list(key)?;
            }
        }

        entries
            .entry(inputs_key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
            .push(inputs_key, input)?;
        entries
            .entry(outputs_key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
            .push(outputs_key, output)
    }

    async fn flush_all(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
