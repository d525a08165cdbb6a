//! Per-step handle passed to every [`Process::resume`][crate::Process::resume].

use des_core::{ProcessId, ResourceId, SimTime};

use crate::kernel::Kernel;
use crate::{Process, ProcessState};

/// Everything a process may touch while it runs.
///
/// `Ctx` lives for exactly one resumption.  The world is a public field so
/// model code can borrow it directly; kernel actions go through methods.
///
/// Actions that would violate a kernel invariant (over-release, an invalid
/// spawn) do not return an error to the body.  They are recorded, and the
/// dispatcher aborts the run as soon as the body yields.
pub struct Ctx<'a, W> {
    pub(crate) kernel:  &'a mut Kernel<W>,
    pub(crate) current: ProcessId,

    /// Shared model state: status flags, counters, per-entity RNGs.
    pub world: &'a mut W,
}

impl<'a, W> Ctx<'a, W> {
    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.kernel.now()
    }

    /// The process being resumed.
    #[inline]
    pub fn current(&self) -> ProcessId {
        self.current
    }

    /// Interrupt `target`'s pending timeout.
    ///
    /// Returns `true` if the interrupt was delivered, `false` if it was a
    /// no-op because `target` is running, waiting on a resource, already
    /// interrupted, or terminated.
    pub fn interrupt(&mut self, target: ProcessId, reason: &'static str) -> bool {
        self.kernel.interrupt(target, reason)
    }

    /// Release one slot of `resource` held by the current process.
    pub fn release(&mut self, resource: ResourceId) {
        let current = self.current;
        if let Err(err) = self.kernel.release(current, resource) {
            self.kernel.record_fault(err);
        }
    }

    /// Start a new process; its first resumption is scheduled at `now`,
    /// after everything already queued for `now`.
    pub fn spawn<P: Process<W> + 'static>(&mut self, body: P) -> ProcessId {
        match self.kernel.spawn(Box::new(body)) {
            Ok(pid) => pid,
            Err(err) => {
                self.kernel.record_fault(err);
                ProcessId::INVALID
            }
        }
    }

    pub fn state_of(&self, process: ProcessId) -> Option<ProcessState> {
        self.kernel.state_of(process)
    }
}
