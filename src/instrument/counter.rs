//! Call Counter
//!
//! Counts invocation attempts of a wrapped operation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{Operation, OperationName};
use crate::store::KeyValueStore;

// == Count Calls ==
/// Increments the counter keyed by the operation name before every call.
///
/// The increment happens even when the inner operation then fails.
pub struct CountCalls<O> {
    inner: O,
}

impl<O: Operation> CountCalls<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for CountCalls<O> {
    type Args = O::Args;
    type Output = O::Output;

    fn name(&self) -> &OperationName {
        self.inner.name()
    }

    fn store(&self) -> &Arc<dyn KeyValueStore> {
        self.inner.store()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output> {
        let name = self.inner.name();
        let calls = self.inner.store().increment(name.counter_key()).await?;
        debug!("{} call #{}", name, calls);
        self.inner.call(args).await
    }
}
