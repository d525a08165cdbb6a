//! Unit and integration tests for des-kernel.

use des_core::{ProcessId, ResourceId, SimConfig, SimTime};

use crate::{Ctx, Process, Wait, Wake};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Shared test world: an append-only log of `(time, label)` records.
#[derive(Default)]
struct Log {
    records: Vec<(f64, &'static str)>,
}

impl Log {
    fn times_of(&self, label: &str) -> Vec<f64> {
        self.records.iter().filter(|(_, l)| *l == label).map(|(t, _)| *t).collect()
    }
}

fn config(horizon: f64) -> SimConfig {
    SimConfig::new(42, horizon)
}

/// Fires every `period` units and logs `label`.
struct Ticker {
    period: f64,
    label:  &'static str,
}

impl Process<Log> for Ticker {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
        if wake == Wake::Timeout {
            let now = ctx.now().as_f64();
            ctx.world.records.push((now, self.label));
        }
        Wait::Timeout(self.period)
    }
}

/// Waits `delay`, logs `label`, exits.
struct OneShot {
    delay: f64,
    label: &'static str,
}

impl Process<Log> for OneShot {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
        match wake {
            Wake::Start => Wait::Timeout(self.delay),
            _ => {
                let now = ctx.now().as_f64();
                ctx.world.records.push((now, self.label));
                Wait::Exit
            }
        }
    }
}

/// Performs one unit of `duration`; on interruption waits `repair`, then
/// resumes the remainder.  Logs "done" when the unit completes.
struct Worker {
    duration:   f64,
    repair:     f64,
    remaining:  f64,
    started:    SimTime,
    repairing:  bool,
}

impl Worker {
    fn new(duration: f64, repair: f64) -> Self {
        Self { duration, repair, remaining: 0.0, started: SimTime::ZERO, repairing: false }
    }
}

impl Process<Log> for Worker {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
        let now = ctx.now();
        match wake {
            Wake::Start => {
                self.remaining = self.duration;
                self.started = now;
                Wait::Timeout(self.remaining)
            }
            Wake::Interrupted(_) => {
                self.remaining -= now - self.started;
                self.repairing = true;
                ctx.world.records.push((now.as_f64(), "broken"));
                Wait::Timeout(self.repair)
            }
            Wake::Timeout if self.repairing => {
                self.repairing = false;
                ctx.world.records.push((now.as_f64(), "repaired"));
                self.started = now;
                Wait::Timeout(self.remaining)
            }
            _ => {
                ctx.world.records.push((now.as_f64(), "done"));
                Wait::Exit
            }
        }
    }
}

/// Waits `delay`, then interrupts `target` and logs whether it landed.
struct Breaker {
    delay:  f64,
    target: ProcessId,
}

impl Process<Log> for Breaker {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
        match wake {
            Wake::Start => Wait::Timeout(self.delay),
            _ => {
                let delivered = ctx.interrupt(self.target, "breakdown");
                let now = ctx.now().as_f64();
                ctx.world.records.push((now, if delivered { "hit" } else { "miss" }));
                Wait::Exit
            }
        }
    }
}

/// Arrives after `arrival`, acquires `resource`, holds it for `hold`,
/// releases and exits.  Logs `label` when granted.
struct Customer {
    arrival:  f64,
    hold:     f64,
    resource: ResourceId,
    label:    &'static str,
    holding:  bool,
}

impl Customer {
    fn new(arrival: f64, hold: f64, resource: ResourceId, label: &'static str) -> Self {
        Self { arrival, hold, resource, label, holding: false }
    }
}

impl Process<Log> for Customer {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
        match wake {
            Wake::Start => Wait::Timeout(self.arrival),
            Wake::Timeout if !self.holding => Wait::Acquire(self.resource),
            Wake::Granted(_) => {
                self.holding = true;
                let now = ctx.now().as_f64();
                ctx.world.records.push((now, self.label));
                Wait::Timeout(self.hold)
            }
            _ => {
                ctx.release(self.resource);
                Wait::Exit
            }
        }
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use proptest::prelude::*;

    use super::*;
    use crate::{EventQueue, KernelError};

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(5.0), ProcessId(0), Wake::Timeout).unwrap();
        q.schedule(SimTime(1.0), ProcessId(1), Wake::Timeout).unwrap();
        q.schedule(SimTime(3.0), ProcessId(2), Wake::Timeout).unwrap();
        assert_eq!(q.peek_time(), Some(SimTime(1.0)));

        let order: Vec<u32> = std::iter::from_fn(|| q.pop_earliest().unwrap())
            .map(|(_, e)| e.target.0)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(q.now(), SimTime(5.0));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_times_are_fifo() {
        let mut q = EventQueue::new();
        for p in [4, 2, 9, 0] {
            q.schedule(SimTime(2.0), ProcessId(p), Wake::Start).unwrap();
        }
        let order: Vec<u32> = std::iter::from_fn(|| q.pop_earliest().unwrap())
            .map(|(_, e)| e.target.0)
            .collect();
        assert_eq!(order, vec![4, 2, 9, 0]);
    }

    #[test]
    fn cancel_removes_exactly_one() {
        let mut q = EventQueue::new();
        let a = q.schedule(SimTime(1.0), ProcessId(0), Wake::Timeout).unwrap();
        q.schedule(SimTime(1.0), ProcessId(1), Wake::Timeout).unwrap();
        assert!(q.cancel(a).is_some());
        assert!(q.cancel(a).is_none(), "second cancel is a no-op");
        assert_eq!(q.len(), 1);
        let (_, e) = q.pop_earliest().unwrap().unwrap();
        assert_eq!(e.target, ProcessId(1));
    }

    #[test]
    fn schedule_in_past_is_rejected() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(4.0), ProcessId(0), Wake::Timeout).unwrap();
        q.pop_earliest().unwrap();
        let err = q.schedule(SimTime(3.0), ProcessId(0), Wake::Timeout).unwrap_err();
        assert!(matches!(err, KernelError::ScheduleInPast { .. }), "{err}");
        // Scheduling exactly at `now` is fine.
        assert!(q.schedule(SimTime(4.0), ProcessId(0), Wake::Timeout).is_ok());
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let mut q = EventQueue::new();
        assert!(q.schedule(SimTime(f64::NAN), ProcessId(0), Wake::Timeout).is_err());
        assert!(q.schedule(SimTime(f64::INFINITY), ProcessId(0), Wake::Timeout).is_err());
    }

    #[test]
    fn clock_never_regresses() {
        let mut clock = crate::Clock::new();
        clock.advance_to(SimTime(2.0)).unwrap();
        clock.advance_to(SimTime(2.0)).unwrap();
        assert!(matches!(
            clock.advance_to(SimTime(1.0)),
            Err(KernelError::ClockRegression { .. })
        ));
        assert_eq!(clock.now(), SimTime(2.0));
    }

    proptest! {
        /// Interleaved schedules (always at or after `now`) and pops: popped
        /// times never decrease, and ties come out in schedule order.
        #[test]
        fn popped_times_are_monotonic(ops in prop::collection::vec((0u8..3, 0.0f64..50.0), 1..200)) {
            let mut q = EventQueue::new();
            let mut last: Option<(SimTime, u64)> = None;
            for (op, offset) in ops {
                if op < 2 {
                    // Coarse offsets so that ties actually occur.
                    let at = q.now() + offset.floor();
                    q.schedule(at, ProcessId(0), Wake::Timeout).unwrap();
                } else if let Some((key, _)) = q.pop_earliest().unwrap() {
                    if let Some((t, seq)) = last {
                        prop_assert!(key.time >= t);
                        if key.time == t {
                            prop_assert!(key.seq > seq);
                        }
                    }
                    prop_assert_eq!(q.now(), key.time);
                    last = Some((key.time, key.seq));
                }
            }
        }
    }
}

// ── Timeouts and the horizon ──────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{KernelError, NoopObserver, ProcessState, Sim, SimObserver};

    #[test]
    fn ticker_fires_until_horizon() {
        let mut sim = Sim::new(config(3.5), Log::default()).unwrap();
        sim.spawn(Ticker { period: 1.0, label: "tick" }).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("tick"), vec![1.0, 2.0, 3.0]);
        assert_eq!(sim.now(), SimTime(3.5), "clock parked at horizon");
        assert_eq!(sim.pending_events(), 0, "leftover events discarded");
    }

    #[test]
    fn event_at_horizon_is_processed() {
        let mut sim = Sim::new(config(10.0), Log::default()).unwrap();
        sim.spawn(OneShot { delay: 10.0, label: "at" }).unwrap();
        sim.spawn(OneShot { delay: 11.0, label: "after" }).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("at"), vec![10.0]);
        assert!(sim.world.times_of("after").is_empty());
    }

    #[test]
    fn run_until_advances_in_slices() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        sim.spawn(Ticker { period: 2.0, label: "tick" }).unwrap();
        sim.run_until(SimTime(5.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("tick").len(), 2);
        assert_eq!(sim.now(), SimTime(5.0));
        assert_eq!(sim.next_event_time(), Some(SimTime(6.0)));
        sim.run_until(SimTime(8.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("tick"), vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn step_dispatches_one_event() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let pid = sim.spawn(Ticker { period: 2.0, label: "tick" }).unwrap();
        assert_eq!(sim.process_state(pid), Some(ProcessState::Runnable));
        assert!(sim.step(&mut NoopObserver).unwrap());
        assert!(sim.process_state(pid).unwrap().is_waiting_on_timeout());
        assert_eq!(sim.dispatched(), 1);
    }

    #[test]
    fn exit_terminates_process() {
        let mut sim = Sim::new(config(5.0), Log::default()).unwrap();
        let pid = sim.spawn(OneShot { delay: 1.0, label: "x" }).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.process_state(pid), Some(ProcessState::Terminated));
    }

    #[test]
    fn negative_timeout_aborts_run() {
        struct Backwards;
        impl Process<Log> for Backwards {
            fn resume(&mut self, _wake: Wake, _ctx: &mut Ctx<'_, Log>) -> Wait {
                Wait::Timeout(-1.0)
            }
        }
        let mut sim = Sim::new(config(5.0), Log::default()).unwrap();
        sim.spawn(Backwards).unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, KernelError::ScheduleInPast { .. }), "{err}");
        assert!(matches!(sim.run(&mut NoopObserver), Err(KernelError::Poisoned)));
    }

    #[test]
    fn nan_timeout_aborts_run() {
        struct NotANumber;
        impl Process<Log> for NotANumber {
            fn resume(&mut self, _wake: Wake, _ctx: &mut Ctx<'_, Log>) -> Wait {
                Wait::Timeout(f64::NAN)
            }
        }
        let mut sim = Sim::new(config(5.0), Log::default()).unwrap();
        sim.spawn(NotANumber).unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, KernelError::InvalidDuration { .. }), "{err}");
    }

    #[test]
    fn invalid_horizon_rejected() {
        assert!(Sim::new(config(0.0), Log::default()).is_err());
        assert!(Sim::new(config(f64::NAN), Log::default()).is_err());
    }

    #[test]
    fn zero_timeouts_keep_fifo_order() {
        struct Yielder;
        impl Process<Log> for Yielder {
            fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
                match wake {
                    Wake::Start => Wait::Timeout(0.0),
                    _ => {
                        ctx.world.records.push((ctx.now().as_f64(), "yielder"));
                        Wait::Exit
                    }
                }
            }
        }
        let mut sim = Sim::new(config(5.0), Log::default()).unwrap();
        sim.spawn(Yielder).unwrap();
        sim.spawn(OneShot { delay: 0.0, label: "other" }).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        let labels: Vec<_> = sim.world.records.iter().map(|(_, l)| *l).collect();
        assert_eq!(labels, vec!["yielder", "other"]);
    }

    #[test]
    fn observer_sees_every_dispatch() {
        #[derive(Default)]
        struct Counter {
            dispatches: u64,
            end:        Option<(SimTime, u64)>,
        }
        impl SimObserver for Counter {
            fn on_dispatch(&mut self, _k: crate::EventKey, _p: ProcessId, _w: &Wake) {
                self.dispatches += 1;
            }
            fn on_sim_end(&mut self, t: SimTime, n: u64) {
                self.end = Some((t, n));
            }
        }
        let mut sim = Sim::new(config(4.0), Log::default()).unwrap();
        sim.spawn(Ticker { period: 1.0, label: "tick" }).unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        // Start + 4 timeouts (1, 2, 3, 4).
        assert_eq!(obs.dispatches, 5);
        assert_eq!(obs.end, Some((SimTime(4.0), 5)));
    }

    #[test]
    fn identical_runs_are_identical() {
        fn trace() -> Vec<(u64, u64, u32)> {
            #[derive(Default)]
            struct Recorder(Vec<(u64, u64, u32)>);
            impl SimObserver for Recorder {
                fn on_dispatch(&mut self, k: crate::EventKey, p: ProcessId, _w: &Wake) {
                    self.0.push((k.time.as_f64().to_bits(), k.seq, p.0));
                }
            }
            let mut sim = Sim::new(config(50.0), Log::default()).unwrap();
            sim.spawn(Ticker { period: 1.5, label: "a" }).unwrap();
            sim.spawn(Ticker { period: 2.5, label: "b" }).unwrap();
            let w = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
            sim.spawn(Breaker { delay: 4.0, target: w }).unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();
            rec.0
        }
        assert_eq!(trace(), trace());
    }
}

// ── Interrupts ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod interrupt_tests {
    use super::*;
    use crate::{NoopObserver, ProcessState, Sim, SimObserver};

    #[test]
    fn remainder_is_resumed_exactly() {
        // D = 10, interrupt at 4, repair 5 → done at 4 + 5 + 6 = 15.
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let w = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
        sim.spawn(Breaker { delay: 4.0, target: w }).unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert_eq!(sim.world.times_of("hit"), vec![4.0]);
        assert_eq!(sim.world.times_of("broken"), vec![4.0]);
        assert_eq!(sim.world.times_of("repaired"), vec![9.0]);
        assert_eq!(sim.world.times_of("done"), vec![15.0]);
    }

    #[test]
    fn cancelled_timeout_never_fires() {
        struct TimeoutsFor(ProcessId, Vec<f64>);
        impl SimObserver for TimeoutsFor {
            fn on_dispatch(&mut self, k: crate::EventKey, p: ProcessId, w: &Wake) {
                if p == self.0 && *w == Wake::Timeout {
                    self.1.push(k.time.as_f64());
                }
            }
        }
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let w = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
        sim.spawn(Breaker { delay: 4.0, target: w }).unwrap();
        let mut obs = TimeoutsFor(w, Vec::new());
        sim.run(&mut obs).unwrap();
        // The scheduled completion at 10 was cancelled; only repair end (9)
        // and remainder end (15) are timeouts.
        assert_eq!(obs.1, vec![9.0, 15.0]);
    }

    #[test]
    fn interrupted_process_waits_again_after_handling() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let w = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
        sim.spawn(Breaker { delay: 4.0, target: w }).unwrap();
        sim.run_until(SimTime(4.0), &mut NoopObserver).unwrap();
        // The interrupted resumption at 4 has run; the worker is now in its
        // repair timeout (4..9), which is itself interruptible.
        assert_eq!(sim.world.times_of("broken"), vec![4.0]);
        assert_eq!(
            sim.process_state(w),
            Some(ProcessState::Waiting(crate::WaitKind::Timeout {
                started:  SimTime(4.0),
                duration: 5.0,
            }))
        );
    }

    #[test]
    fn second_interrupt_before_dispatch_is_noop() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let w = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
        sim.spawn(Breaker { delay: 4.0, target: w }).unwrap();
        sim.spawn(Breaker { delay: 4.0, target: w }).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        // First breaker hits; the second finds the worker already
        // Interrupted (resumption pending) and misses.
        assert_eq!(sim.world.times_of("hit"), vec![4.0]);
        assert_eq!(sim.world.times_of("miss"), vec![4.0]);
        assert_eq!(sim.world.times_of("done"), vec![15.0]);
    }

    #[test]
    fn interrupting_resource_waiter_is_noop() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let r = sim.add_resource(1).unwrap();
        sim.spawn(Customer::new(0.0, 10.0, r, "first")).unwrap();
        let waiter = sim.spawn(Customer::new(1.0, 1.0, r, "second")).unwrap();
        sim.run_until(SimTime(2.0), &mut NoopObserver).unwrap();
        assert_eq!(
            sim.process_state(waiter),
            Some(ProcessState::Waiting(crate::WaitKind::Resource(r)))
        );
        assert!(!sim.interrupt(waiter, "ignored"));
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("second"), vec![10.0]);
    }

    #[test]
    fn interrupting_terminated_or_unknown_is_noop() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let p = sim.spawn(OneShot { delay: 1.0, label: "x" }).unwrap();
        sim.run_until(SimTime(2.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.process_state(p), Some(ProcessState::Terminated));
        assert!(!sim.interrupt(p, "late"));
        assert!(!sim.interrupt(ProcessId(999), "nobody"));
        assert_eq!(sim.pending_events(), 0);
    }

    #[test]
    fn interrupt_after_horizon_is_not_delivered() {
        // The worker's completion at 10 lies past the horizon of 8.
        let mut sim = Sim::new(config(8.0), Log::default()).unwrap();
        let w = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.is_finished());
        assert_eq!(sim.pending_events(), 0);

        assert!(!sim.interrupt(w, "late"));
        assert_eq!(sim.pending_events(), 0);

        sim.run(&mut NoopObserver).unwrap();
        assert!(!sim.step(&mut NoopObserver).unwrap());
        assert!(sim.world.times_of("broken").is_empty());
        assert_eq!(sim.now(), SimTime(8.0));
    }

    #[test]
    fn terminated_ids_are_not_reused() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let first = sim.spawn(OneShot { delay: 1.0, label: "first" }).unwrap();
        sim.run_until(SimTime(2.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.process_state(first), Some(ProcessState::Terminated));

        let second = sim.spawn(Worker::new(10.0, 5.0)).unwrap();
        assert_ne!(first, second);
        assert_eq!(sim.process_count(), 2);
        sim.run_until(SimTime(3.0), &mut NoopObserver).unwrap();
        // The stale id still names the finished process, not the worker.
        assert!(!sim.interrupt(first, "stale"));
        assert!(sim.world.times_of("broken").is_empty());
    }

    #[test]
    fn interrupt_carries_reason_and_elapsed() {
        struct Recorder;
        impl Process<Log> for Recorder {
            fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
                if let Wake::Interrupted(i) = wake {
                    let label = if i.reason == "power cut" && i.elapsed == 2.5 { "payload" } else { "wrong" };
                    ctx.world.records.push((ctx.now().as_f64(), label));
                    return Wait::Exit;
                }
                Wait::Timeout(100.0)
            }
        }
        struct Check;
        impl Process<Log> for Check {
            fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
                match wake {
                    Wake::Start => Wait::Timeout(2.5),
                    _ => {
                        // The recorder is process 0 and waits on a timeout.
                        assert!(ctx.state_of(ProcessId(0)).unwrap().is_waiting_on_timeout());
                        assert!(ctx.interrupt(ProcessId(0), "power cut"));
                        assert_eq!(ctx.state_of(ProcessId(0)), Some(ProcessState::Interrupted));
                        ctx.world.records.push((ctx.now().as_f64(), "checked"));
                        Wait::Exit
                    }
                }
            }
        }
        let mut sim = Sim::new(config(10.0), Log::default()).unwrap();
        sim.spawn(Recorder).unwrap();
        sim.spawn(Check).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("checked"), vec![2.5]);
        assert_eq!(sim.world.times_of("payload"), vec![2.5]);
        assert_eq!(sim.process_state(ProcessId(0)), Some(ProcessState::Terminated));
    }

    #[test]
    fn self_interrupt_is_noop() {
        struct Selfish;
        impl Process<Log> for Selfish {
            fn resume(&mut self, _wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
                let me = ctx.current();
                let hit = ctx.interrupt(me, "self");
                ctx.world.records.push((0.0, if hit { "hit" } else { "miss" }));
                Wait::Exit
            }
        }
        let mut sim = Sim::new(config(1.0), Log::default()).unwrap();
        sim.spawn(Selfish).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("miss"), vec![0.0]);
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resource_tests {
    use super::*;
    use crate::{KernelError, NoopObserver, ResourceTable, Sim};

    #[test]
    fn grants_are_fifo() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let r = sim.add_resource(1).unwrap();
        sim.spawn(Customer::new(0.0, 10.0, r, "holder")).unwrap();
        sim.spawn(Customer::new(0.0, 5.0, r, "r0")).unwrap();
        sim.spawn(Customer::new(1.0, 5.0, r, "r1")).unwrap();
        sim.spawn(Customer::new(2.0, 5.0, r, "r2")).unwrap();
        // Arrives at exactly the release time, but after the three queued.
        sim.spawn(Customer::new(10.0, 5.0, r, "late")).unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let order: Vec<_> = sim.world.records.iter().map(|(_, l)| *l).collect();
        assert_eq!(order, vec!["holder", "r0", "r1", "r2", "late"]);
        assert_eq!(sim.world.times_of("r0"), vec![10.0]);
        assert_eq!(sim.world.times_of("r1"), vec![15.0]);
        assert_eq!(sim.world.times_of("r2"), vec![20.0]);
        assert_eq!(sim.world.times_of("late"), vec![25.0]);
    }

    #[test]
    fn released_slot_is_handed_over_not_freed() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let r = sim.add_resource(1).unwrap();
        sim.spawn(Customer::new(0.0, 10.0, r, "holder")).unwrap();
        sim.spawn(Customer::new(1.0, 5.0, r, "next")).unwrap();
        sim.run_until(SimTime(10.0), &mut NoopObserver).unwrap();
        let res = sim.resource(r).unwrap();
        assert_eq!(res.in_use(), 1);
        assert_eq!(res.queue_len(), 0);
        assert_eq!(res.grants(), 2);
    }

    #[test]
    fn capacity_two_serves_in_parallel() {
        let mut sim = Sim::new(config(100.0), Log::default()).unwrap();
        let r = sim.add_resource(2).unwrap();
        sim.spawn(Customer::new(0.0, 10.0, r, "a")).unwrap();
        sim.spawn(Customer::new(0.0, 10.0, r, "b")).unwrap();
        sim.spawn(Customer::new(0.0, 10.0, r, "c")).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.times_of("a"), vec![0.0]);
        assert_eq!(sim.world.times_of("b"), vec![0.0]);
        assert_eq!(sim.world.times_of("c"), vec![10.0]);
        let res = sim.resource(r).unwrap();
        assert_eq!(res.capacity(), 2);
        assert_eq!(res.in_use(), 0);
    }

    #[test]
    fn over_release_aborts_run() {
        struct Thief(ResourceId);
        impl Process<Log> for Thief {
            fn resume(&mut self, _wake: Wake, ctx: &mut Ctx<'_, Log>) -> Wait {
                ctx.release(self.0);
                Wait::Exit
            }
        }
        let mut sim = Sim::new(config(10.0), Log::default()).unwrap();
        let r = sim.add_resource(1).unwrap();
        sim.spawn(Thief(r)).unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, KernelError::OverRelease { .. }), "{err}");
    }

    #[test]
    fn unknown_resource_aborts_run() {
        struct Lost;
        impl Process<Log> for Lost {
            fn resume(&mut self, _wake: Wake, _ctx: &mut Ctx<'_, Log>) -> Wait {
                Wait::Acquire(ResourceId(7))
            }
        }
        let mut sim = Sim::new(config(10.0), Log::default()).unwrap();
        sim.spawn(Lost).unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, KernelError::UnknownResource(ResourceId(7))), "{err}");
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut table = ResourceTable::new();
        assert!(matches!(table.add(0), Err(KernelError::InvalidCapacity)));
        assert!(table.is_empty());
    }

    #[test]
    fn table_release_by_non_holder_is_over_release() {
        let mut table = ResourceTable::new();
        let r = table.add(1).unwrap();
        assert_eq!(table.request(r, ProcessId(0)).unwrap(), crate::Request::Granted);
        assert_eq!(table.request(r, ProcessId(1)).unwrap(), crate::Request::Queued);
        assert!(table.release(r, ProcessId(2)).is_err());
        assert_eq!(table.release(r, ProcessId(0)).unwrap(), Some(ProcessId(1)));
        assert!(table.get(r).unwrap().is_held_by(ProcessId(1)));
        assert_eq!(table.release(r, ProcessId(1)).unwrap(), None);
        assert_eq!(table.get(r).unwrap().in_use(), 0);
    }
}
