//! Instrumentation Module
//!
//! Call counting and call history as explicit wrappers around an
//! [`Operation`]. Each wrapper is itself an `Operation`, so they stack in
//! any order:
//!
//! ```ignore
//! let op = CountCalls::new(CallHistory::new(StorePayload::new(store.clone()), store.clone()), store);
//! ```

mod count;
mod history;

use std::fmt::Display;

use async_trait::async_trait;

use crate::cache::Payload;
use crate::error::Result;

pub use count::CountCalls;
pub use history::CallHistory;

// == Operation ==
/// A named, fallible async operation that can be instrumented.
#[async_trait]
pub trait Operation: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Stable qualified name, e.g. `Cache.store`. Namespaces the counter
    /// and history keys.
    fn identity(&self) -> &str;

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output>;
}

// == Key Layout ==
/// Counter key for an operation identity.
pub fn counter_key(identity: &str) -> String {
    identity.to_string()
}

/// History list holding rendered inputs.
pub fn inputs_key(identity: &str) -> String {
    format!("{}:inputs", identity)
}

/// History list holding rendered outputs.
pub fn outputs_key(identity: &str) -> String {
    format!("{}:outputs", identity)
}

// == Call Args ==
/// Renders an operation's positional arguments as a tuple, e.g. `("a",)`
/// or `(2, 3)`. The rendering is deterministic for a given input.
pub trait CallArgs {
    fn render_args(&self) -> String;
}

impl CallArgs for () {
    fn render_args(&self) -> String {
        "()".to_string()
    }
}

impl CallArgs for Payload {
    fn render_args(&self) -> String {
        format!("({},)", self)
    }
}

impl CallArgs for String {
    fn render_args(&self) -> String {
        format!("({:?},)", self)
    }
}

impl CallArgs for i64 {
    fn render_args(&self) -> String {
        format!("({},)", self)
    }
}

impl<A: Display, B: Display> CallArgs for (A, B) {
    fn render_args(&self) -> String {
        format!("({}, {})", self.0, self.1)
    }
}
