//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `POST /store` - Store a payload, returns the generated key
//! - `GET /get/:key` - Raw bytes by key
//! - `GET /get/:key/{text,int,float}` - Typed retrieval
//! - `GET /replay/:identity` - Replay an instrumented operation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
