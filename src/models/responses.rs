//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the STORE operation (POST /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// The generated key
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Response body for raw retrieval (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct BytesResponse {
    /// The requested key
    pub key: String,
    /// The stored bytes
    pub bytes: Vec<u8>,
}

impl BytesResponse {
    /// Creates a new BytesResponse
    pub fn new(key: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            bytes,
        }
    }
}

/// Response body for typed retrieval (GET /get/:key/{text,int,float})
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse<T> {
    /// The requested key
    pub key: String,
    /// The converted value
    pub value: T,
}

impl<T: Serialize> ValueResponse<T> {
    /// Creates a new ValueResponse
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_response_serialize() {
        let resp = StoreResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"key":"my_key"}"#);
    }

    #[test]
    fn test_bytes_response_serialize() {
        let resp = BytesResponse::new("k", b"hi".to_vec());
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"key":"k","bytes":[104,105]}"#);
    }

    #[test]
    fn test_value_response_serialize() {
        let resp = ValueResponse::new("k", 42i64);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"key":"k","value":42}"#);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
