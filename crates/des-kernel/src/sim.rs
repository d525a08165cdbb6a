//! The `Sim` struct and its dispatch loop.

use des_core::{ProcessId, ResourceId, SimConfig, SimTime};
use tracing::{debug, info, trace};

use crate::kernel::Kernel;
use crate::{Ctx, KernelError, KernelResult, Process, ProcessState, Resource, SimObserver, Wait};

/// The discrete-event simulation runner.
///
/// `Sim<W>` owns the kernel (event queue, clock, process and resource
/// tables) and the world `W` shared by every process.  Each step:
///
/// 1. **Pop** the earliest `(time, seq)` event and advance the clock to it.
/// 2. **Resume** the target process with the event's [`Wake`][crate::Wake].
///    The body runs alone until it returns a [`Wait`].
/// 3. **Apply** the wait: schedule a timeout, enqueue a resource request, or
///    terminate the process.
///
/// The loop ends once the next event lies beyond the horizon.  Events exactly
/// at the horizon are dispatched.  The clock is then parked at the horizon
/// and the remaining events are discarded.
///
/// A kernel invariant violation aborts the run: `run` returns the error and
/// every later call returns [`KernelError::Poisoned`].
///
/// Once `run` has returned the simulation is finished: the discarded waits
/// can no longer be interrupted, and further `run`, `run_until` and `step`
/// calls dispatch nothing.
pub struct Sim<W> {
    /// Seed and horizon.
    pub config: SimConfig,

    /// Shared model state handed to every process through [`Ctx`].
    pub world: W,

    kernel:     Kernel<W>,
    dispatched: u64,
    poisoned:   bool,
    finished:   bool,
}

impl<W> Sim<W> {
    /// Validate `config` and create an empty simulation around `world`.
    pub fn new(config: SimConfig, world: W) -> KernelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            world,
            kernel:     Kernel::new(),
            dispatched: 0,
            poisoned:   false,
            finished:   false,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register a process; it starts at the current time, after everything
    /// already scheduled for that time.
    pub fn spawn<P: Process<W> + 'static>(&mut self, body: P) -> KernelResult<ProcessId> {
        self.kernel.spawn(Box::new(body))
    }

    /// Register a resource with `capacity` slots.
    pub fn add_resource(&mut self, capacity: usize) -> KernelResult<ResourceId> {
        self.kernel.resources.add(capacity)
    }

    /// Interrupt `target` from outside any process body.  Always a no-op
    /// once the run is finished.
    pub fn interrupt(&mut self, target: ProcessId, reason: &'static str) -> bool {
        if self.finished {
            debug!(%target, reason, "interrupt after the horizon ignored");
            return false;
        }
        self.kernel.interrupt(target, reason)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.kernel.now()
    }

    pub fn process_state(&self, process: ProcessId) -> Option<ProcessState> {
        self.kernel.state_of(process)
    }

    pub fn process_count(&self) -> usize {
        self.kernel.processes.len()
    }

    pub fn resource(&self, resource: ResourceId) -> Option<&Resource> {
        self.kernel.resources.get(resource)
    }

    /// Live events still in the queue.
    pub fn pending_events(&self) -> usize {
        self.kernel.queue.len()
    }

    /// Time of the next pending event.
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.kernel.queue.peek_time()
    }

    /// Events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// `true` once [`run`][Self::run] has reached the horizon.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run to `config.horizon`, then discard whatever is still queued.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> KernelResult<()> {
        if self.finished {
            debug!("run called on a finished simulation");
            return Ok(());
        }
        let horizon = self.config.horizon;
        info!(
            horizon = horizon.as_f64(),
            processes = self.kernel.processes.len(),
            "simulation started"
        );
        self.run_until(horizon, observer)?;

        let discarded = self.kernel.queue.len();
        self.kernel.queue.clear();
        for entry in &mut self.kernel.processes {
            entry.pending = None;
        }
        self.finished = true;
        info!(dispatched = self.dispatched, discarded, "horizon reached");
        observer.on_sim_end(self.now(), self.dispatched);
        Ok(())
    }

    /// Dispatch every event with time ≤ `limit` (capped at the horizon) and
    /// leave the clock at `limit`.  Pending events beyond `limit` stay queued,
    /// so a run can be advanced in slices.
    pub fn run_until<O: SimObserver>(&mut self, limit: SimTime, observer: &mut O) -> KernelResult<()> {
        if self.poisoned {
            return Err(KernelError::Poisoned);
        }
        if self.finished {
            return Ok(());
        }
        let limit = limit.min(self.config.horizon);
        let result = self.drain(limit, observer);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Dispatch a single event if one is due at or before the horizon.
    /// Returns `false` when there is nothing left to do.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> KernelResult<bool> {
        if self.poisoned {
            return Err(KernelError::Poisoned);
        }
        if self.finished {
            return Ok(false);
        }
        match self.kernel.queue.peek_time() {
            Some(t) if t <= self.config.horizon => {}
            _ => return Ok(false),
        }
        let result = self.dispatch_next(observer);
        if result.is_err() {
            self.poisoned = true;
        }
        result.map(|_| true)
    }

    fn drain<O: SimObserver>(&mut self, limit: SimTime, observer: &mut O) -> KernelResult<()> {
        while let Some(t) = self.kernel.queue.peek_time() {
            if t > limit {
                break;
            }
            self.dispatch_next(observer)?;
        }
        if limit > self.now() {
            self.kernel.queue.advance_to(limit)?;
        }
        Ok(())
    }

    fn dispatch_next<O: SimObserver>(&mut self, observer: &mut O) -> KernelResult<()> {
        let Some((key, event)) = self.kernel.queue.pop_earliest()? else {
            return Ok(());
        };
        let pid = event.target;
        let entry = self
            .kernel
            .processes
            .get_mut(pid.index())
            .ok_or(KernelError::UnknownProcess(pid))?;
        entry.pending = None;
        entry.state = ProcessState::Runnable;
        let Some(mut body) = entry.body.take() else {
            debug!(process = %pid, "event for a terminated process dropped");
            return Ok(());
        };

        observer.on_dispatch(key, pid, &event.wake);
        trace!(
            time = key.time.as_f64(),
            seq = key.seq,
            process = %pid,
            label = body.label(),
            wake = event.wake.label(),
            "dispatch"
        );
        self.dispatched += 1;

        let wait = {
            let mut ctx = Ctx {
                kernel:  &mut self.kernel,
                current: pid,
                world:   &mut self.world,
            };
            body.resume(event.wake, &mut ctx)
        };

        if let Some(err) = self.kernel.fault.take() {
            return Err(err);
        }

        match wait {
            Wait::Exit => {
                self.kernel.terminate(pid);
            }
            Wait::Timeout(duration) => {
                self.kernel.processes[pid.index()].body = Some(body);
                self.kernel.start_timeout(pid, duration)?;
            }
            Wait::Acquire(resource) => {
                self.kernel.processes[pid.index()].body = Some(body);
                self.kernel.start_acquire(pid, resource)?;
            }
        }
        Ok(())
    }
}
