//! Replay Cache - An instrumented key/value cache client
//!
//! Stores payloads under generated keys in a Redis-like store, counts and
//! records calls to instrumented operations, and replays the recorded
//! history as a readable trace.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod models;
pub mod replay;
pub mod store;

pub use api::AppState;
pub use cache::{Cache, Payload};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{MemoryStore, StoreAdapter};
