//! Call History
//!
//! Records the arguments and results of a wrapped operation in two lists
//! that stay positionally aligned for serial callers.
//!
//! The input append, the call and the output append are separate store
//! round-trips. Concurrent callers of the same operation can interleave
//! them, so under concurrency the i-th input is not guaranteed to belong to
//! the i-th output. A call that fails records its input but no output.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{Operation, OperationName};
use crate::store::KeyValueStore;

// == Record Rendering ==
/// Renders positional arguments as a comma-separated list of JSON values.
///
/// Tuples become their elements joined by `", "`; the unit tuple renders as
/// an empty string.
pub fn render_args<T: Serialize + ?Sized>(args: &T) -> Result<String> {
    Ok(match serde_json::to_value(args)? {
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    })
}

/// Renders a result; text is recorded verbatim, anything else as JSON.
pub fn render_output<T: Serialize + ?Sized>(output: &T) -> Result<String> {
    Ok(match serde_json::to_value(output)? {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

// == Call History ==
/// Appends the serialized input before and the serialized output after
/// each call of the wrapped operation.
pub struct CallHistory<O> {
    inner: O,
}

impl<O: Operation> CallHistory<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for CallHistory<O> {
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
        let store = self.inner.store();

        let input = render_args(&args)?;
        store
            .append_to_list(&name.inputs_key(), input.as_bytes())
            .await?;

        let output = self.inner.call(args).await?;

        let recorded = render_output(&output)?;
        store
            .append_to_list(&name.outputs_key(), recorded.as_bytes())
            .await?;
        debug!("{}({}) -> {}", name, input, recorded);

        Ok(output)
    }
}
