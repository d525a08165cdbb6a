//! The `OutputWriter` trait implemented by output backends.

use crate::{EventRow, JourneyRow, OutputResult, StationRow};

/// Sink for run results and the optional event trace.
///
/// Errors raised while the simulation is running are stored by
/// [`EventLogObserver`][crate::EventLogObserver] and retrieved with
/// `take_error`.
pub trait OutputWriter {
    /// Append a batch of dispatched events to the trace.  Backends that were
    /// opened without a trace ignore the rows.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write the final per-station counters.
    fn write_stations(&mut self, rows: &[StationRow]) -> OutputResult<()>;

    /// Write the passenger summary row.
    fn write_journeys(&mut self, row: &JourneyRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
