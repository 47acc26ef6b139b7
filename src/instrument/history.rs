//! Call History Wrapper

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key, CallArgs, Operation};
use crate::store::StoreAdapter;

/// Records each successful call's rendered input and output onto the
/// operation's `:inputs` and `:outputs` lists in one atomic append.
///
/// A failing inner call appends nothing and its error is returned as-is.
pub struct CallHistory<O> {
    inner: O,
    store: Arc<dyn StoreAdapter>,
}

impl<O: Operation> CallHistory<O> {
    pub fn new(inner: O, store: Arc<dyn StoreAdapter>) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<O> Operation for CallHistory<O>
where
    O: Operation,
    O::Input: CallArgs,
    O::Output: Display,
{
    type Input = O::Input;
    type Output = O::Output;

    fn identity(&self) -> &str {
        self.inner.identity()
    }

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output> {
        let args = input.render_args();
        let output = self.inner.invoke(input).await?;
        let rendered = output.to_string();

        let identity = self.identity();
        let recorded = self
            .store
            .record_call(
                &inputs_key(identity),
                args.as_bytes(),
                &outputs_key(identity),
                rendered.as_bytes(),
            )
            .await?;
        debug!(operation = identity, recorded, "recorded call history");

        Ok(output)
    }
}
