//! Concurrency Tests
//!
//! Many tasks sharing one cache over one store.

use std::collections::HashSet;
use std::sync::Arc;

use replay_cache::cache::STORE_IDENTITY;
use replay_cache::instrument::CallArgs;
use replay_cache::{Cache, MemoryStore, Payload, StoreAdapter};

const TASKS: usize = 32;
const CALLS_PER_TASK: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stores_keep_exact_counts() {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(Cache::new(store.clone()).await.unwrap());

    let handles: Vec<_> = (0..TASKS)
        .map(|task| {
            let cache = cache.clone();
            tokio::spawn(async move {
                let mut keys = Vec::with_capacity(CALLS_PER_TASK);
                for call in 0..CALLS_PER_TASK {
                    let value = format!("task{}-call{}", task, call);
                    let key = cache.store(value.clone()).await.unwrap();
                    keys.push((key, value));
                }
                keys
            })
        })
        .collect();

    let mut stored = Vec::new();
    for handle in handles {
        stored.extend(handle.await.unwrap());
    }
    let total = TASKS * CALLS_PER_TASK;

    // Every key reads back its own value.
    for (key, value) in &stored {
        assert_eq!(cache.retrieve_as_text(key).await.unwrap().as_deref(), Some(value.as_str()));
    }

    let trace = cache.replay(STORE_IDENTITY).await.unwrap();
    assert_eq!(trace.calls, total as i64);
    assert_eq!(trace.entries.len(), total);
    assert_eq!(trace.lines().len(), total + 1);

    // No entry lost or duplicated in either history list.
    let outputs: HashSet<String> = trace.entries.iter().map(|e| e.output.clone()).collect();
    let keys: HashSet<String> = stored.iter().map(|(key, _)| key.clone()).collect();
    assert_eq!(outputs, keys);

    let inputs = store.lrange("Cache.store:inputs", 0, -1).await.unwrap();
    assert_eq!(inputs.len(), total);

    // Each recorded input belongs to the call that produced the output at
    // the same position: the key holds exactly the value the input names.
    for entry in &trace.entries {
        let value = cache.retrieve_as_text(&entry.output).await.unwrap().unwrap();
        assert_eq!(
            entry.input,
            Payload::from(value).render_args(),
            "input {} paired with output {}",
            entry.input,
            entry.output
        );
    }
}

#[tokio::test]
async fn test_sequential_history_pairs_match() {
    let store = Arc::new(MemoryStore::new());
    let cache = Cache::new(store).await.unwrap();

    let mut keys = Vec::new();
    for value in ["a", "b", "c"] {
        keys.push(cache.store(value).await.unwrap());
    }

    let trace = cache.replay(STORE_IDENTITY).await.unwrap();
    assert_eq!(trace.lines()[0], "Cache.store was called 3 times:");
    for ((entry, key), value) in trace.entries.iter().zip(&keys).zip(["a", "b", "c"]) {
        assert_eq!(&entry.output, key);
        assert_eq!(entry.input, format!("({:?},)", value));
    }
}
