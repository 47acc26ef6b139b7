//! Replay Module
//!
//! Rebuilds a readable trace of an instrumented operation from its call
//! counter and history lists.

use std::fmt;

use tracing::{debug, warn};

use crate::error::Result;
use crate::instrument::{counter_key, inputs_key, outputs_key};
use crate::store::StoreAdapter;

// == Trace Entry ==
/// One recorded call: rendered arguments and rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub input: String,
    pub output: String,
}

// == Trace ==
/// The replayed history of one operation identity.
///
/// Renders as a header line followed by one line per call:
///
/// ```text
/// Cache.store was called 2 times:
/// Cache.store(*("a",)) -> 0b6e5c1e-...
/// Cache.store(*("b",)) -> 5d2f8a90-...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub identity: String,
    /// Counter value; 0 when the counter is absent or unreadable
    pub calls: i64,
    /// Input/output pairs in call order
    pub entries: Vec<TraceEntry>,
}

impl Trace {
    /// Returns the rendered lines, header first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(format!("{} was called {} times:", self.identity, self.calls));
        for entry in &self.entries {
            lines.push(format!(
                "{}(*{}) -> {}",
                self.identity, entry.input, entry.output
            ));
        }
        lines
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Reads the counter and both history lists for `identity`.
///
/// Never fails on missing or corrupt data: an absent counter reads as 0,
/// undecodable entries become empty strings, and lists of unequal length
/// are paired up to the shorter one. Store failures still propagate.
pub async fn replay(store: &dyn StoreAdapter, identity: &str) -> Result<Trace> {
    let calls = store
        .get(&counter_key(identity))
        .await?
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0);

    let inputs = store.lrange(&inputs_key(identity), 0, -1).await?;
    let outputs = store.lrange(&outputs_key(identity), 0, -1).await?;

    if inputs.len() != outputs.len() {
        warn!(
            operation = identity,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "history lists differ in length, pairing the common prefix"
        );
    }

    let entries: Vec<TraceEntry> = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| TraceEntry {
            input: decode_entry(input),
            output: decode_entry(output),
        })
        .collect();

    debug!(operation = identity, calls, entries = entries.len(), "replayed history");

    Ok(Trace {
        identity: identity.to_string(),
        calls,
        entries,
    })
}

fn decode_entry(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_default()
}
