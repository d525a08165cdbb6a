//! The `Process` trait: the main extension point for model code.

use des_core::{ResourceId, SimTime};

use crate::{Ctx, Wake};

/// What a process asks for when it yields back to the scheduler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Wait {
    /// Suspend until `now + duration`.  Interruptible.
    Timeout(f64),
    /// Suspend until a slot of the resource is granted.  Not interruptible.
    Acquire(ResourceId),
    /// Terminate.  The process is never resumed again.
    Exit,
}

/// What a process is currently waiting on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WaitKind {
    Timeout { started: SimTime, duration: f64 },
    Resource(ResourceId),
}

/// Kernel-side lifecycle of a process.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProcessState {
    /// Has a resumption scheduled (start, grant) or is executing right now.
    Runnable,
    /// Suspended on a timeout or a resource.
    Waiting(WaitKind),
    /// Its timeout was cancelled; the interrupted resumption is pending.
    Interrupted,
    /// Returned [`Wait::Exit`].
    Terminated,
}

impl ProcessState {
    pub fn is_waiting_on_timeout(&self) -> bool {
        matches!(self, ProcessState::Waiting(WaitKind::Timeout { .. }))
    }
}

/// A cooperative strand of simulated activity written as an explicit state
/// machine.
///
/// The scheduler calls [`resume`][Self::resume] with the outcome of the
/// previous wait.  The body runs to completion without any other process
/// executing in between, may act on the world and the kernel through `ctx`
/// (interrupt another process, release a resource, spawn), and returns the
/// next [`Wait`].
///
/// Any state that must survive a suspension (a phase, a remaining duration,
/// a wait start time) lives in `self`.
///
/// # Example
///
/// ```rust,ignore
/// struct Ticker { fired: u32 }
///
/// impl<W> Process<W> for Ticker {
///     fn resume(&mut self, wake: Wake, _ctx: &mut Ctx<'_, W>) -> Wait {
///         if wake == Wake::Timeout { self.fired += 1; }
///         Wait::Timeout(1.0)
///     }
/// }
/// ```
pub trait Process<W> {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, W>) -> Wait;

    /// Name used in trace output.
    fn label(&self) -> &str {
        "process"
    }
}
