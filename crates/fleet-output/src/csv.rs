//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `scores.csv`
//!
//! Absent ids are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputError, OutputResult, ScoreRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    scores:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (truncating old ones) and write the
    /// header rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        if !dir.is_dir() {
            return Err(OutputError::MissingDirectory(dir.to_path_buf()));
        }
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "unix_time_secs", "event", "vehicle", "node", "order"])?;

        let mut scores = Writer::from_path(dir.join("scores.csv"))?;
        scores.write_record(["criterion", "score", "final_tick"])?;

        Ok(Self {
            events,
            scores,
            finished: false,
        })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.unix_time_secs.to_string(),
                row.event.to_owned(),
                opt(row.vehicle),
                opt(row.node),
                opt(row.order),
            ])?;
        }
        Ok(())
    }

    fn write_scores(&mut self, rows: &[ScoreRow]) -> OutputResult<()> {
        for row in rows {
            self.scores.write_record(&[
                row.criterion.to_owned(),
                row.score.to_string(),
                row.final_tick.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.scores.flush()?;
        Ok(())
    }
}
