//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::Payload;

/// A JSON value accepted as a payload.
///
/// Strings map to text, integers to integers, other numbers to floats,
/// and `{"bytes": [..]}` to a byte payload. Integers outside the `i64`
/// range are rejected rather than stored as a lossy float.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum PayloadValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl TryFrom<Value> for PayloadValue {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(PayloadValue::Text(text)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(PayloadValue::Integer(i))
                } else if n.is_u64() {
                    Err(format!("integer {} does not fit in a signed 64-bit payload", n))
                } else {
                    n.as_f64()
                        .map(PayloadValue::Float)
                        .ok_or_else(|| format!("number {} is not representable", n))
                }
            }
            Value::Object(mut map) => match map.remove("bytes") {
                Some(bytes) if map.is_empty() => serde_json::from_value(bytes)
                    .map(PayloadValue::Bytes)
                    .map_err(|e| format!("invalid bytes payload: {}", e)),
                _ => Err("object payloads must be exactly {\"bytes\": [..]}".to_string()),
            },
            other => Err(format!("unsupported payload value: {}", other)),
        }
    }
}

impl From<PayloadValue> for Payload {
    fn from(value: PayloadValue) -> Self {
        match value {
            PayloadValue::Integer(n) => Payload::Integer(n),
            PayloadValue::Float(x) => Payload::Float(x),
            PayloadValue::Text(text) => Payload::Text(text),
            PayloadValue::Bytes(bytes) => Payload::Bytes(bytes),
        }
    }
}

/// Request body for the STORE operation (POST /store)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store
    pub value: PayloadValue,
}
