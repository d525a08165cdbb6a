//! `des-output`: result writers for des simulations.
//!
//! | File           | Contents                                         |
//! |----------------|--------------------------------------------------|
//! | `stations.csv` | `station, kind, completed, failures, suppressed` |
//! | `journeys.csv` | one passenger summary row                        |
//! | `events.csv`   | `time, seq, process, wake` per dispatched event  |
//!
//! The event trace is streamed during the run by [`EventLogObserver`]; the
//! two summary files are written afterwards from a `TerminalReport` with
//! [`write_report`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use des_output::{CsvWriter, EventLogObserver, write_report};
//!
//! let mut obs = EventLogObserver::new(CsvWriter::with_trace(Path::new("./output"))?);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! let mut writer = obs.into_writer();
//! write_report(&mut writer, &TerminalReport::from_sim(&sim))?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLogObserver;
pub use row::{EventRow, JourneyRow, StationRow};
pub use writer::OutputWriter;

use des_station::TerminalReport;

/// Write the per-station rows and, if the run had passengers, the journey
/// summary, then finish the writer.
pub fn write_report<O: OutputWriter>(writer: &mut O, report: &TerminalReport) -> OutputResult<()> {
    let rows: Vec<StationRow> = report.stations.iter().map(StationRow::from).collect();
    writer.write_stations(&rows)?;
    if let Some(journeys) = &report.journeys {
        writer.write_journeys(&JourneyRow::from(journeys))?;
    }
    writer.finish()
}
