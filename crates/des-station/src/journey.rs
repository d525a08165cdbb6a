//! Passenger journeys through counter resources.
//!
//! A [`PassengerSource`] spawns one [`Passenger`] per arrival.  Each
//! passenger walks an ordered list of [`JourneyStep`]s: queue for the step's
//! counter (FIFO), hold one slot for a sampled service time, release it, move
//! on.  [`JourneyLog`] accumulates the aggregate statistics.

use std::rc::Rc;

use des_core::{Dist, ResourceId, SimTime};
use des_kernel::{Ctx, Process, Wait, Wake};
use tracing::{trace, warn};

use crate::Terminal;

/// One stop on a passenger's route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JourneyStep {
    pub counter: ResourceId,
    pub service: Dist,
}

// ── JourneyLog ────────────────────────────────────────────────────────────────

/// Aggregate passenger statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JourneyLog {
    pub arrived:              u64,
    pub departed:             u64,
    /// Sum over departed passengers of the time spent queueing for counters.
    pub total_wait:           f64,
    /// Longest single queueing wait, departed or not.
    pub max_wait:             f64,
    /// Sum over departed passengers of arrival-to-departure time.
    pub total_time_in_system: f64,
}

impl JourneyLog {
    /// Passengers still inside the terminal.
    pub fn in_system(&self) -> u64 {
        self.arrived - self.departed
    }

    /// Mean time in system over departed passengers; `None` before the first
    /// departure.
    pub fn mean_time_in_system(&self) -> Option<f64> {
        (self.departed > 0).then(|| self.total_time_in_system / self.departed as f64)
    }

    /// Mean queueing wait per departed passenger.
    pub fn mean_wait(&self) -> Option<f64> {
        (self.departed > 0).then(|| self.total_wait / self.departed as f64)
    }

    fn record_wait(&mut self, wait: f64) {
        if wait > self.max_wait {
            self.max_wait = wait;
        }
    }

    fn record_departure(&mut self, waited: f64, stay: f64) {
        self.departed += 1;
        self.total_wait += waited;
        self.total_time_in_system += stay;
    }
}

// ── PassengerSource ───────────────────────────────────────────────────────────

/// Generates passengers with `interarrival` gaps, starting one gap after
/// time zero.
pub struct PassengerSource {
    interarrival: Dist,
    steps:        Rc<[JourneyStep]>,
}

impl PassengerSource {
    pub fn new(interarrival: Dist, steps: Vec<JourneyStep>) -> Self {
        Self { interarrival, steps: steps.into() }
    }

    fn next_arrival(&self, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        match self.interarrival.sample(&mut ctx.world.journey_rng) {
            Some(gap) => Wait::Timeout(gap),
            None => Wait::Exit,
        }
    }
}

impl Process<Terminal> for PassengerSource {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        if matches!(wake, Wake::Timeout) {
            ctx.world.journeys.arrived += 1;
            let pid = ctx.spawn(Passenger::new(Rc::clone(&self.steps)));
            trace!(passenger = %pid, time = ctx.now().as_f64(), "passenger arrived");
        }
        self.next_arrival(ctx)
    }

    fn label(&self) -> &str {
        "passenger-source"
    }
}

// ── Passenger ─────────────────────────────────────────────────────────────────

pub struct Passenger {
    steps:     Rc<[JourneyStep]>,
    step:      usize,
    arrived:   SimTime,
    requested: SimTime,
    /// Queueing time over the steps taken so far.
    waited:    f64,
}

impl Passenger {
    pub fn new(steps: Rc<[JourneyStep]>) -> Self {
        Self {
            steps,
            step:      0,
            arrived:   SimTime::ZERO,
            requested: SimTime::ZERO,
            waited:    0.0,
        }
    }

    /// Queue for the current step's counter, or leave if the route is done.
    fn advance(&mut self, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        match self.steps.get(self.step) {
            Some(step) => {
                self.requested = ctx.now();
                Wait::Acquire(step.counter)
            }
            None => {
                let stay = ctx.now().since(self.arrived);
                ctx.world.journeys.record_departure(self.waited, stay);
                Wait::Exit
            }
        }
    }

    fn finish_step(&mut self, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        if let Some(step) = self.steps.get(self.step) {
            ctx.release(step.counter);
        }
        self.step += 1;
        self.advance(ctx)
    }
}

impl Process<Terminal> for Passenger {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        match wake {
            Wake::Start => {
                self.arrived = ctx.now();
                self.advance(ctx)
            }
            Wake::Granted(_) => {
                let waited = ctx.now().since(self.requested);
                self.waited += waited;
                ctx.world.journeys.record_wait(waited);
                let service = self.steps[self.step].service;
                match service.sample(&mut ctx.world.journey_rng) {
                    Some(d) => Wait::Timeout(d),
                    None => self.finish_step(ctx),
                }
            }
            Wake::Timeout => self.finish_step(ctx),
            Wake::Interrupted(interrupt) => {
                warn!(reason = interrupt.reason, "passenger interrupted; step cut short");
                self.finish_step(ctx)
            }
        }
    }

    fn label(&self) -> &str {
        "passenger"
    }
}
