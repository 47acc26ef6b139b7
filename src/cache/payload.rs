//! Payload Module
//!
//! Defines the values the cache accepts and their canonical byte encoding.

use std::fmt;

// == Payload ==
/// A value stored by [`Cache::store`](crate::cache::Cache::store).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl Payload {
    // == Encode ==
    /// Returns the bytes written to the store.
    ///
    /// Text is UTF-8, bytes are written unchanged, numbers are written as
    /// decimal text so they read back the same way a Redis client would
    /// see them.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.as_bytes().to_vec(),
            Payload::Bytes(bytes) => bytes.clone(),
            Payload::Integer(n) => n.to_string().into_bytes(),
            Payload::Float(x) => x.to_string().into_bytes(),
        }
    }
}

/// Rendering used in call histories: quoted text, `b"..."` bytes, bare numbers.
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => write!(f, "{:?}", text),
            Payload::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            Payload::Integer(n) => write!(f, "{}", n),
            Payload::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Bytes(value)
    }
}

impl From<&[u8]> for Payload {
    fn from(value: &[u8]) -> Self {
        Payload::Bytes(value.to_vec())
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Integer(value)
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Float(value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(Payload::from("foo").encode(), b"foo");
        assert_eq!(Payload::from(vec![0xffu8, 0x00]).encode(), vec![0xff, 0x00]);
        assert_eq!(Payload::from(42i64).encode(), b"42");
        assert_eq!(Payload::from(-7i64).encode(), b"-7");
        assert_eq!(Payload::from(3.5f64).encode(), b"3.5");
    }

    #[test]
    fn test_float_encoding_parses_back() {
        for x in [0.1f64, -2.25, 1e21, 1.0] {
            let encoded = String::from_utf8(Payload::from(x).encode()).unwrap();
            assert_eq!(encoded.parse::<f64>().unwrap(), x);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Payload::from("a\"b").to_string(), r#""a\"b""#);
        assert_eq!(Payload::from(&b"hi\xff"[..]).to_string(), r#"b"hi\xff""#);
        assert_eq!(Payload::from(42i64).to_string(), "42");
        assert_eq!(Payload::from(1.0f64).to_string(), "1.0");
    }
}
