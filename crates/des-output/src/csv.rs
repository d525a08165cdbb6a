//! CSV output backend.
//!
//! Creates, in the configured output directory:
//! - `stations.csv`
//! - `journeys.csv`
//! - `events.csv`, only when opened with [`CsvWriter::with_trace`]

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{EventRow, JourneyRow, OutputResult, StationRow};

pub struct CsvWriter {
    stations: Writer<File>,
    journeys: Writer<File>,
    events:   Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) `stations.csv` and `journeys.csv` in `dir` and write
    /// their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stations = Writer::from_path(dir.join("stations.csv"))?;
        stations.write_record(["station", "kind", "completed", "failures", "suppressed"])?;

        let mut journeys = Writer::from_path(dir.join("journeys.csv"))?;
        journeys.write_record([
            "arrived",
            "departed",
            "in_system",
            "mean_wait",
            "max_wait",
            "mean_time_in_system",
        ])?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self { stations, journeys, events: None, finished: false })
    }

    /// Like [`new`][Self::new], plus an `events.csv` dispatch trace.
    pub fn with_trace(dir: &Path) -> OutputResult<Self> {
        let mut writer = Self::new(dir)?;
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["time", "seq", "process", "wake"])?;
        writer.events = Some(events);
        Ok(writer)
    }

    pub fn has_trace(&self) -> bool {
        self.events.is_some()
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        let Some(events) = self.events.as_mut() else {
            return Ok(());
        };
        for row in rows {
            events.write_record(&[
                row.time.to_string(),
                row.seq.to_string(),
                row.process.to_string(),
                row.wake.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_stations(&mut self, rows: &[StationRow]) -> OutputResult<()> {
        for row in rows {
            self.stations.write_record(&[
                row.station.clone(),
                row.kind.to_string(),
                row.completed.to_string(),
                row.failures.to_string(),
                row.suppressed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_journeys(&mut self, row: &JourneyRow) -> OutputResult<()> {
        self.journeys.write_record(&[
            row.arrived.to_string(),
            row.departed.to_string(),
            row.in_system.to_string(),
            row.mean_wait.to_string(),
            row.max_wait.to_string(),
            row.mean_time_in_system.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stations.flush()?;
        self.journeys.flush()?;
        if let Some(events) = self.events.as_mut() {
            events.flush()?;
        }
        Ok(())
    }
}
