//! Keyspace Entry Module
//!
//! Defines the values held by the in-memory keyspace.

use crate::error::{CacheError, Result};

// == Entry ==
/// A single keyspace slot: either a plain byte string or a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Value written by `SET` or `INCR`
    Bytes(Vec<u8>),
    /// List built by `RPUSH`
    List(Vec<Vec<u8>>),
}

impl Entry {
    // == Increment ==
    /// Applies `INCR` to a byte-string slot, returning the new value.
    ///
    /// Counters are stored as decimal text, so a `GET` on a counter key
    /// returns the same bytes Redis would.
    pub fn increment(&mut self, key: &str) -> Result<i64> {
        let bytes = match self {
            Entry::Bytes(bytes) => bytes,
            Entry::List(_) => return Err(wrong_type(key)),
        };

        let current: i64 = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                CacheError::Store(format!("value at '{}' is not an integer", key))
            })?;
        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::Store(format!("increment at '{}' would overflow", key))
        })?;

        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    // == Push ==
    /// Appends to a list slot, returning the new length.
    pub fn push(&mut self, key: &str, value: &[u8]) -> Result<usize> {
        match self {
            Entry::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            Entry::Bytes(_) => Err(wrong_type(key)),
        }
    }

    // == Range ==
    /// Reads an inclusive range with Redis index rules.
    ///
    /// Negative indices count from the end; out-of-range bounds are clamped
    /// and an empty range yields an empty vector.
    pub fn range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        let items = match self {
            Entry::List(items) => items,
            Entry::Bytes(_) => return Err(wrong_type(key)),
        };

        let len = items.len() as i64;
        let start = if start < 0 { (len + start).max(0) } else { start };
        let end = if end < 0 { len + end } else { end.min(len - 1) };

        if len == 0 || start > end || start >= len {
            return Ok(Vec::new());
        }

        Ok(items[start as usize..=end as usize].to_vec())
    }

    // == Ensure List ==
    /// Fails with `WrongType` unless this slot is a list.
    pub fn ensure_list(&self, key: &str) -> Result<()> {
        match self {
            Entry::List(_) => Ok(()),
            Entry::Bytes(_) => Err(wrong_type(key)),
        }
    }

    // == Bytes ==
    /// Returns the byte-string contents, rejecting lists.
    pub fn bytes(&self, key: &str) -> Result<&[u8]> {
        match self {
            Entry::Bytes(bytes) => Ok(bytes),
            Entry::List(_) => Err(wrong_type(key)),
        }
    }
}

fn wrong_type(key: &str) -> CacheError {
    CacheError::WrongType(format!(
        "operation against '{}' holding the wrong kind of value",
        key
    ))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> Entry {
        Entry::List(values.iter().map(|v| v.as_bytes().to_vec()).collect())
    }

    fn strings(items: Vec<Vec<u8>>) -> Vec<String> {
        items
            .into_iter()
            .map(|i| String::from_utf8(i).unwrap())
            .collect()
    }

    #[test]
    fn test_increment_decimal_text() {
        let mut entry = Entry::Bytes(b"41".to_vec());
        assert_eq!(entry.increment("c").unwrap(), 42);
        assert_eq!(entry, Entry::Bytes(b"42".to_vec()));
    }

    #[test]
    fn test_increment_non_integer() {
        let mut entry = Entry::Bytes(b"foo".to_vec());
        assert!(matches!(entry.increment("c"), Err(CacheError::Store(_))));
    }

    #[test]
    fn test_increment_list_is_wrong_type() {
        let mut entry = list(&["a"]);
        assert!(matches!(entry.increment("l"), Err(CacheError::WrongType(_))));
    }

    #[test]
    fn test_push_returns_length() {
        let mut entry = list(&[]);
        assert_eq!(entry.push("l", b"a").unwrap(), 1);
        assert_eq!(entry.push("l", b"b").unwrap(), 2);
    }

    #[test]
    fn test_range_full() {
        let entry = list(&["a", "b", "c"]);
        assert_eq!(strings(entry.range("l", 0, -1).unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn test_range_negative_and_clamped() {
        let entry = list(&["a", "b", "c"]);
        assert_eq!(strings(entry.range("l", -2, -1).unwrap()), ["b", "c"]);
        assert_eq!(strings(entry.range("l", 1, 100).unwrap()), ["b", "c"]);
        assert_eq!(strings(entry.range("l", -100, 0).unwrap()), ["a"]);
    }

    #[test]
    fn test_range_empty_cases() {
        let entry = list(&["a", "b", "c"]);
        assert!(entry.range("l", 2, 1).unwrap().is_empty());
        assert!(entry.range("l", 5, 10).unwrap().is_empty());
        assert!(list(&[]).range("l", 0, -1).unwrap().is_empty());
    }
}
