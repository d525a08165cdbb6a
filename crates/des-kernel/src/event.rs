//! `EventQueue`: pending wake-ups ordered by (time, arrival sequence).
//!
//! # Ordering
//!
//! Every scheduled event gets a monotonically increasing sequence number.
//! Entries are keyed by [`EventKey`] `(time, seq)` in a `BTreeMap`, so the
//! earliest entry is the first key, and events at the same virtual time come
//! out in the order they were scheduled.  For a fixed random stream this
//! makes every run reproducible.
//!
//! Unlike a binary heap, the `BTreeMap` supports exact removal of one entry,
//! which is what an interrupt needs to cancel a pending timeout.  Cancelled
//! events are gone, not tombstoned, so `len()` is always the number of live
//! wake-ups.
//!
//! The queue also owns the [`Clock`]: popping an event is the only way the
//! clock moves forward (apart from parking it at the horizon when a run ends).

use std::collections::BTreeMap;

use des_core::{ProcessId, ResourceId, SimTime};

use crate::{Clock, KernelError, KernelResult};

// ── Wake payloads ─────────────────────────────────────────────────────────────

/// Details of an interruption delivered to a process waiting on a timeout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interrupt {
    /// Free-form reason supplied by the interrupter.
    pub reason: &'static str,
    /// How long the interrupted timeout had been running.
    pub elapsed: f64,
}

/// Why a process is being resumed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Wake {
    /// First resumption after spawn.
    Start,
    /// The requested timeout ran to completion.
    Timeout,
    /// The pending timeout was cancelled by an interrupt.
    Interrupted(Interrupt),
    /// A slot of the resource was granted.
    Granted(ResourceId),
}

impl Wake {
    /// Short label used in traces and CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            Wake::Start => "start",
            Wake::Timeout => "timeout",
            Wake::Interrupted(_) => "interrupted",
            Wake::Granted(_) => "granted",
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// Position of an event in the queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventKey {
    pub time: SimTime,
    pub seq:  u64,
}

/// A scheduled resumption of `target` carrying `wake`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    pub target: ProcessId,
    pub wake:   Wake,
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Priority queue of pending events plus the virtual clock.
#[derive(Default)]
pub struct EventQueue {
    entries:  BTreeMap<EventKey, Event>,
    next_seq: u64,
    clock:    Clock,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Insert an event for `target` at `time`.
    ///
    /// Scheduling before the current clock (or at a non-finite time) is a
    /// fatal [`KernelError::ScheduleInPast`].
    pub fn schedule(&mut self, time: SimTime, target: ProcessId, wake: Wake) -> KernelResult<EventKey> {
        let now = self.now();
        if time < now || !time.is_finite() {
            return Err(KernelError::ScheduleInPast { at: time, now });
        }
        let key = EventKey { time, seq: self.next_seq };
        self.next_seq += 1;
        self.entries.insert(key, Event { target, wake });
        Ok(key)
    }

    /// Remove and return the lowest `(time, seq)` entry, advancing the clock
    /// to its time.
    pub fn pop_earliest(&mut self) -> KernelResult<Option<(EventKey, Event)>> {
        let Some((key, event)) = self.entries.pop_first() else {
            return Ok(None);
        };
        self.clock.advance_to(key.time)?;
        Ok(Some((key, event)))
    }

    /// Time of the earliest entry, or `None` if the queue is empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.entries.keys().next().map(|k| k.time)
    }

    /// Remove one pending entry.  Returns the event if it was still queued.
    pub fn cancel(&mut self, key: EventKey) -> Option<Event> {
        self.entries.remove(&key)
    }

    /// Move the clock forward without dispatching anything.
    pub fn advance_to(&mut self, time: SimTime) -> KernelResult<()> {
        self.clock.advance_to(time)
    }

    /// Drop every pending entry.  The clock is untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
