//! Kernel state shared between the dispatcher and [`Ctx`][crate::Ctx].
//!
//! `Kernel<W>` owns the event queue, the process table and the resource
//! table.  The world `W` is not stored here: the dispatcher
//! hands `&mut Kernel<W>` and `&mut W` to a process as two disjoint borrows.

use des_core::{ProcessId, ResourceId, SimTime};
use tracing::{debug, warn};

use crate::{
    EventKey, EventQueue, Interrupt, KernelError, KernelResult, Process, ProcessState, Request,
    ResourceTable, Wake, WaitKind,
};

pub(crate) struct ProcessEntry<W> {
    /// `None` while the body is executing and after it terminated.
    pub(crate) body:    Option<Box<dyn Process<W>>>,
    pub(crate) state:   ProcessState,
    /// The one outstanding event targeting this process, if any.
    pub(crate) pending: Option<EventKey>,
}

pub(crate) struct Kernel<W> {
    pub(crate) queue:     EventQueue,
    /// Indexed by `ProcessId`.  Slots are never reused: a terminated entry
    /// keeps only its state, so a stale id stays `Terminated` instead of
    /// aliasing a later process.  The table grows by one small entry per
    /// spawn over the run.
    pub(crate) processes: Vec<ProcessEntry<W>>,
    pub(crate) resources: ResourceTable,
    /// First invariant violation raised from inside a process body.
    pub(crate) fault:     Option<KernelError>,
}

impl<W> Kernel<W> {
    pub(crate) fn new() -> Self {
        Self {
            queue:     EventQueue::new(),
            processes: Vec::new(),
            resources: ResourceTable::new(),
            fault:     None,
        }
    }

    #[inline]
    pub(crate) fn now(&self) -> SimTime {
        self.queue.now()
    }

    pub(crate) fn record_fault(&mut self, err: KernelError) {
        if self.fault.is_none() {
            self.fault = Some(err);
        }
    }

    pub(crate) fn state_of(&self, process: ProcessId) -> Option<ProcessState> {
        self.processes.get(process.index()).map(|e| e.state)
    }

    /// Register `body` and schedule its first resumption at the current time.
    pub(crate) fn spawn(&mut self, body: Box<dyn Process<W>>) -> KernelResult<ProcessId> {
        let pid = ProcessId::try_from(self.processes.len())
            .map_err(|_| KernelError::UnknownProcess(ProcessId::INVALID))?;
        self.processes.push(ProcessEntry {
            body:    Some(body),
            state:   ProcessState::Runnable,
            pending: None,
        });
        let now = self.now();
        self.schedule(now, pid, Wake::Start)?;
        Ok(pid)
    }

    fn schedule(&mut self, at: SimTime, process: ProcessId, wake: Wake) -> KernelResult<()> {
        let entry = self
            .processes
            .get_mut(process.index())
            .ok_or(KernelError::UnknownProcess(process))?;
        let key = self.queue.schedule(at, process, wake)?;
        entry.pending = Some(key);
        Ok(())
    }

    pub(crate) fn start_timeout(&mut self, process: ProcessId, duration: f64) -> KernelResult<()> {
        if !duration.is_finite() {
            return Err(KernelError::InvalidDuration { process, duration });
        }
        let now = self.now();
        // A negative duration lands before `now` and is rejected by the queue.
        self.schedule(now + duration, process, Wake::Timeout)?;
        self.processes[process.index()].state =
            ProcessState::Waiting(WaitKind::Timeout { started: now, duration });
        Ok(())
    }

    pub(crate) fn start_acquire(&mut self, process: ProcessId, resource: ResourceId) -> KernelResult<()> {
        let request = self.resources.request(resource, process)?;
        self.processes[process.index()].state = ProcessState::Waiting(WaitKind::Resource(resource));
        if request == Request::Granted {
            let now = self.now();
            self.schedule(now, process, Wake::Granted(resource))?;
        }
        Ok(())
    }

    /// Free `process`'s slot in `resource` and hand it to the head of the
    /// queue, if any, within this step.
    pub(crate) fn release(&mut self, process: ProcessId, resource: ResourceId) -> KernelResult<()> {
        if let Some(next) = self.resources.release(resource, process)? {
            let now = self.now();
            debug!(%resource, from = %process, to = %next, "slot handed over");
            self.schedule(now, next, Wake::Granted(resource))?;
        }
        Ok(())
    }

    /// Cancel `target`'s pending timeout and resume it now with an
    /// interrupted outcome.  No-op unless `target` waits on a timeout.
    pub(crate) fn interrupt(&mut self, target: ProcessId, reason: &'static str) -> bool {
        let now = self.now();
        let Some(entry) = self.processes.get_mut(target.index()) else {
            debug!(%target, reason, "interrupt of unknown process ignored");
            return false;
        };
        let ProcessState::Waiting(WaitKind::Timeout { started, .. }) = entry.state else {
            debug!(%target, reason, state = ?entry.state, "interrupt ignored: not waiting on a timeout");
            return false;
        };

        if let Some(key) = entry.pending.take() {
            self.queue.cancel(key);
        }
        let wake = Wake::Interrupted(Interrupt { reason, elapsed: now - started });
        match self.queue.schedule(now, target, wake) {
            Ok(key) => {
                entry.pending = Some(key);
                entry.state = ProcessState::Interrupted;
                debug!(%target, reason, elapsed = now - started, "interrupt delivered");
                true
            }
            Err(err) => {
                if self.fault.is_none() {
                    self.fault = Some(err);
                }
                false
            }
        }
    }

    /// Park a finished body.  Warns if it still holds resource slots.
    pub(crate) fn terminate(&mut self, process: ProcessId) {
        let held = self.resources.held_by(process);
        if held > 0 {
            warn!(%process, held, "process exited while holding resource slots");
        }
        let entry = &mut self.processes[process.index()];
        entry.state = ProcessState::Terminated;
        entry.pending = None;
    }
}
