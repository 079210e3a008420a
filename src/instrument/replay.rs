//! Replay Reporter
//!
//! Reads the counter and history of one operation and renders them as a
//! human-readable transcript. Read-only.

use std::fmt;

use crate::error::{CacheError, Result};
use crate::instrument::Operation;

// == Replayed Call ==
/// One recorded invocation: serialized arguments and serialized result.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayedCall {
    pub input: String,
    pub output: String,
}

// == Replay Report ==
/// Snapshot of an operation's instrumentation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// Operation name
    pub name: String,
    /// Counter value, 0 when never counted
    pub count: i64,
    /// Inputs paired with outputs, truncated to the shorter list
    pub calls: Vec<ReplayedCall>,
}

impl ReplayReport {
    /// Header line followed by one line per paired call.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.calls.len() + 1);
        lines.push(format!("{} was called {} times:", self.name, self.count));
        lines.extend(
            self.calls
                .iter()
                .map(|call| format!("{}({}) -> {}", self.name, call.input, call.output)),
        );
        lines
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

// == Replay ==
/// Builds the report for `op` from its backing store.
pub async fn replay<O: Operation + ?Sized>(op: &O) -> Result<ReplayReport> {
    let name = op.name();
    let store = op.store();

    let count = match store.get(name.counter_key()).await? {
        None => 0,
        Some(raw) => {
            let text = decode(raw);
            text.trim().parse::<i64>().map_err(|_| {
                CacheError::Conversion(format!("counter {} holds non-integer {:?}", name, text))
            })?
        }
    };

    let inputs = store.list_range(&name.inputs_key(), 0, -1).await?;
    let outputs = store.list_range(&name.outputs_key(), 0, -1).await?;

    let calls = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| ReplayedCall {
            input: decode(input),
            output: decode(output),
        })
        .collect();

    Ok(ReplayReport {
        name: name.to_string(),
        count,
        calls,
    })
}
