//! Instrumentation Module
//!
//! Call counting and call history as composable wrappers around typed
//! operations, plus replay of the recorded history.
//!
//! # Key layout
//! - `<name>` - invocation counter
//! - `<name>:inputs` - serialized positional arguments, one per call
//! - `<name>:outputs` - serialized results, one per successful call

mod counter;
mod history;
mod operation;
mod replay;

pub use counter::CountCalls;
pub use history::{render_args, render_output, CallHistory};
pub use operation::{operation_fn, FnOperation, Operation, OperationExt, OperationName};
pub use replay::{replay, ReplayReport, ReplayedCall};
