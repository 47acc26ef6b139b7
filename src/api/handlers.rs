//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::Cache;
use crate::config::{Backend, Config};
use crate::error::{CacheError, Result};
use crate::models::{BytesResponse, HealthResponse, StoreRequest, StoreResponse, ValueResponse};
use crate::store::{MemoryStore, StoreAdapter};

/// Application state shared across all handlers.
///
/// The cache is stateless beyond its store, so a shared `Arc` is enough.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<Cache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Connects the configured backend and builds the cache over it.
    ///
    /// Building the cache flushes the backend.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn StoreAdapter> = match config.backend {
            Backend::Memory => Arc::new(MemoryStore::new()),
            #[cfg(feature = "redis-backend")]
            Backend::Redis => Arc::new(
                crate::store::RedisStore::connect(&config.redis_url, config.store_timeout())
                    .await?,
            ),
            #[cfg(not(feature = "redis-backend"))]
            Backend::Redis => {
                return Err(CacheError::InvalidRequest(
                    "built without the redis-backend feature".to_string(),
                ))
            }
        };
        info!("Using {:?} backend", config.backend);

        Ok(Self::new(Cache::new(store).await?))
    }
}

/// Handler for POST /store
///
/// Stores the payload under a generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.cache.store(req.value).await?;
    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Returns the raw stored bytes.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<BytesResponse>> {
    match state.cache.retrieve(&key).await? {
        Some(bytes) => Ok(Json(BytesResponse::new(key, bytes))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /get/:key/text
///
/// Invalid UTF-8 is reported as 422.
pub async fn get_text_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse<String>>> {
    match state.cache.retrieve_as_text(&key).await? {
        Some(text) => Ok(Json(ValueResponse::new(key, text))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /get/:key/int
pub async fn get_int_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse<i64>>> {
    let value = state.cache.retrieve_as_integer(&key).await?;
    Ok(Json(ValueResponse::new(key, value)))
}

/// Handler for GET /get/:key/float
pub async fn get_float_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse<f64>>> {
    let value = state.cache.retrieve_as_float(&key).await?;
    Ok(Json(ValueResponse::new(key, value)))
}

/// Handler for GET /replay/:identity
///
/// Returns the plain-text trace.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<String> {
    let trace = state.cache.replay(&identity).await?;
    Ok(trace.to_string())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
