//! Cache Module
//!
//! Payload storage under generated keys, with typed retrieval and an
//! instrumented `store` operation.

mod client;
mod payload;


// Re-export public types
pub use client::{Cache, StorePayload, STORE_IDENTITY};
pub use payload::Payload;
