//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, ScoreRow};

/// Trait implemented by output backends.
///
/// Errors are stored by [`SimOutputListener`](crate::SimOutputListener) and
/// retrieved with its `take_error`.  `Send` because the listener runs on the
/// simulation thread.
pub trait OutputWriter: Send {
    /// Write a batch of event rows.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write the final scores.
    fn write_scores(&mut self, rows: &[ScoreRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
