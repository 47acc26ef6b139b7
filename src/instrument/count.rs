//! Call Counting Wrapper

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{counter_key, Operation};
use crate::store::StoreAdapter;

/// Increments the operation's counter once per call attempt, before the
/// inner operation runs. Failed calls are counted too.
pub struct CountCalls<O> {
    inner: O,
    store: Arc<dyn StoreAdapter>,
}

impl<O: Operation> CountCalls<O> {
    pub fn new(inner: O, store: Arc<dyn StoreAdapter>) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<O: Operation> Operation for CountCalls<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn identity(&self) -> &str {
        self.inner.identity()
    }

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output> {
        let calls = self.store.incr(&counter_key(self.identity())).await?;
        debug!(operation = self.identity(), calls, "counted call");
        self.inner.invoke(input).await
    }
}
