//! Simulation observer trait for tracing and data collection.

use des_core::{ProcessId, SimTime};

use crate::{EventKey, Wake};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// dispatch loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: interrupt counter
///
/// ```rust,ignore
/// struct Interrupts(usize);
///
/// impl SimObserver for Interrupts {
///     fn on_dispatch(&mut self, _key: EventKey, _process: ProcessId, wake: &Wake) {
///         if matches!(wake, Wake::Interrupted(_)) { self.0 += 1; }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called just before `process` is resumed by the event at `key`.
    fn on_dispatch(&mut self, _key: EventKey, _process: ProcessId, _wake: &Wake) {}

    /// Called once after the horizon is reached.  `dispatched` is the total
    /// number of events resumed during the run.
    fn on_sim_end(&mut self, _final_time: SimTime, _dispatched: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
