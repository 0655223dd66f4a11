//! `SimOutputListener<W>`: bridges `SimListener` to an `OutputWriter`.

use fleet_core::{SimClock, Tick};
use fleet_routing::Event;
use fleet_sim::{Scores, SimListener};

use crate::row::{EventRow, ScoreRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimListener`] that writes every event and the final scores to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimListener`
/// methods have no return value.  Check with
/// [`take_error`][Self::take_error] after the run.
pub struct SimOutputListener<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputListener<W> {
    /// Create a listener backed by `writer`, using `clock` for wall-clock
    /// conversion.
    pub fn new(writer: W, clock: &SimClock) -> Self {
        Self {
            writer,
            clock: clock.clone(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimListener for SimOutputListener<W> {
    fn on_tick(&mut self, events: &[Event], tick: Tick) {
        if events.is_empty() {
            return;
        }
        let unix = self.clock.unix_secs_at(tick);
        let rows: Vec<EventRow> = events.iter().map(|e| EventRow::from_event(e, unix)).collect();
        let result = self.writer.write_events(&rows);
        self.store_err(result);
    }

    fn on_simulation_end(&mut self, tick: Tick, scores: &Scores) {
        let rows: Vec<ScoreRow> = scores
            .iter()
            .map(|(criterion, score)| ScoreRow {
                criterion:  criterion.name(),
                score:      *score,
                final_tick: tick.0,
            })
            .collect();
        let result = self.writer.write_scores(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
