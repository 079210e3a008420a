//! Operation Module
//!
//! The typed operation abstraction every instrumentation wrapper accepts
//! and returns.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::instrument::{CallHistory, CountCalls};
use crate::store::KeyValueStore;

// == Operation Name ==
/// Stable, fully-qualified identifier of an instrumented operation.
///
/// Used verbatim as the counter key and as the prefix of the history keys,
/// so two distinct operations must never share a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationName(String);

impl OperationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the counter.
    pub fn counter_key(&self) -> &str {
        &self.0
    }

    /// Key of the list holding serialized arguments.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    /// Key of the list holding serialized results.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// == Operation ==
/// An async operation bound to a backing store.
///
/// `Args` is the tuple of positional arguments; a one-argument operation
/// takes a one-element tuple.
#[async_trait]
pub trait Operation: Send + Sync {
    type Args: Serialize + Send + Sync + 'static;
    type Output: Serialize + Send + 'static;

    /// Namespace of every instrumentation key for this operation.
    fn name(&self) -> &OperationName;

    /// Store that instrumentation state is written to.
    fn store(&self) -> &Arc<dyn KeyValueStore>;

    async fn call(&self, args: Self::Args) -> Result<Self::Output>;
}

// == Operation Ext ==
/// Combinators for stacking instrumentation wrappers.
///
/// Side effects run outermost first: `op.call_history().count_calls()`
/// increments the counter before appending the input record.
pub trait OperationExt: Operation + Sized {
    fn count_calls(self) -> CountCalls<Self> {
        CountCalls::new(self)
    }

    fn call_history(self) -> CallHistory<Self> {
        CallHistory::new(self)
    }
}

impl<O: Operation> OperationExt for O {}

// == Fn Operation ==
/// Adapts an async closure into an `Operation`.
pub struct FnOperation<F, A, O> {
    name: OperationName,
    store: Arc<dyn KeyValueStore>,
    f: F,
    _marker: PhantomData<fn(A) -> O>,
}

/// Binds `f` to `store` under `name` so it can be instrumented.
pub fn operation_fn<F, Fut, A, O>(
    name: impl Into<OperationName>,
    store: Arc<dyn KeyValueStore>,
    f: F,
) -> FnOperation<F, A, O>
where
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send,
{
    FnOperation {
        name: name.into(),
        store,
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, A, O> Operation for FnOperation<F, A, O>
where
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send,
    A: Serialize + Send + Sync + 'static,
    O: Serialize + Send + 'static,
{
    type Args = A;
    type Output = O;

    fn name(&self) -> &OperationName {
        &self.name
    }

    fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    async fn call(&self, args: A) -> Result<O> {
        (self.f)(args).await
    }
}
