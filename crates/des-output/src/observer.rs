//! `EventLogObserver<O>`: bridges `SimObserver` to an `OutputWriter`.

use des_core::{ProcessId, SimTime};
use des_kernel::{EventKey, SimObserver, Wake};

use crate::row::EventRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Rows buffered before a batch goes to the writer.
const BATCH: usize = 4096;

/// A [`SimObserver`] that streams every dispatched event to an
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct EventLogObserver<O: OutputWriter> {
    writer:     O,
    buffer:     Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<O: OutputWriter> EventLogObserver<O> {
    pub fn new(writer: O) -> Self {
        Self {
            writer,
            buffer:     Vec::with_capacity(BATCH),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer, e.g. to write the final report with it.
    pub fn into_writer(self) -> O {
        self.writer
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
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

impl<O: OutputWriter> SimObserver for EventLogObserver<O> {
    fn on_dispatch(&mut self, key: EventKey, process: ProcessId, wake: &Wake) {
        self.buffer.push(EventRow {
            time:    key.time.as_f64(),
            seq:     key.seq,
            process: process.0,
            wake:    wake.label(),
        });
        if self.buffer.len() >= BATCH {
            self.flush_buffer();
        }
    }

    fn on_sim_end(&mut self, _final_time: SimTime, _dispatched: u64) {
        self.flush_buffer();
    }
}
