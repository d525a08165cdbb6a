//! Failure generators and the break-down policy.

use des_core::{Dist, StationId};
use des_kernel::{Ctx, Process, Wait, Wake};
use tracing::{debug, trace};

use crate::Terminal;

/// Reason attached to every failure interrupt.
pub const BREAKDOWN: &str = "breakdown";

/// What happened to one failure attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailOutcome {
    /// The service loop was interrupted and is now being repaired.
    Delivered,
    /// The station was already broken; the attempt was dropped.
    Suppressed,
    /// The service loop was not in an interruptible wait (not yet started,
    /// or its interrupt is still being handled).
    Missed,
}

/// Try to break `station` down now.
///
/// A station that is already broken is never interrupted again: the attempt
/// is counted in `suppressed` and otherwise lost.
pub fn try_fail(ctx: &mut Ctx<'_, Terminal>, station: StationId) -> FailOutcome {
    let i = station.index();
    if ctx.world.stations.broken[i] {
        ctx.world.stations.suppressed[i] += 1;
        trace!(station = %station, "failure suppressed; station already broken");
        return FailOutcome::Suppressed;
    }
    let target = ctx.world.stations.service_process[i];
    if ctx.interrupt(target, BREAKDOWN) {
        ctx.world.stations.failures[i] += 1;
        FailOutcome::Delivered
    } else {
        debug!(station = %station, "failure missed; service loop not interruptible");
        FailOutcome::Missed
    }
}

/// Failure generator for one station: sleeps for a time-to-failure draw,
/// then calls [`try_fail`], forever.
pub struct FailureGenerator {
    station:  StationId,
    interval: Dist,
}

impl FailureGenerator {
    pub fn new(station: StationId, interval: Dist) -> Self {
        Self { station, interval }
    }

    fn next_attempt(&self, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        match self.interval.sample(ctx.world.rngs.get_mut(self.station)) {
            Some(delay) => Wait::Timeout(delay),
            None => Wait::Exit,
        }
    }
}

impl Process<Terminal> for FailureGenerator {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        if matches!(wake, Wake::Timeout) {
            try_fail(ctx, self.station);
        }
        self.next_attempt(ctx)
    }

    fn label(&self) -> &str {
        "failure-generator"
    }
}
