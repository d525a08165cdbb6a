//! The service loop: one per station, serving units back to back.
//!
//! ```text
//!            ┌────────────── Timeout ──────────────┐
//!            ▼                                      │
//!   Start → Serving { started } ── Interrupted ──→ Repairing { until }
//!            │  ▲                                   │
//!   Timeout  │  └──── Timeout (remaining > 0) ──────┘
//!   (unit done, next unit)
//! ```
//!
//! The remaining service time of the current unit is carried across every
//! interruption, so a unit of length D interrupted after e₁ and e₂ minutes of
//! work completes after exactly D minutes of work plus the repairs.

use des_core::{Dist, SimTime, StationId};
use des_kernel::{Ctx, Process, Wait, Wake};
use tracing::{debug, trace, warn};

use crate::{StationParams, Terminal};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    Serving { started: SimTime },
    Repairing { until: SimTime },
}

/// Service-loop process for one station.
pub struct ServiceLoop {
    station:   StationId,
    service:   Dist,
    repair:    f64,
    phase:     Phase,
    /// Work still owed on the current unit, as of the start of the current
    /// service wait.
    remaining: f64,
}

impl ServiceLoop {
    pub fn new(station: StationId, params: &StationParams) -> Self {
        Self {
            station,
            service:   params.service,
            repair:    params.repair,
            phase:     Phase::Idle,
            remaining: 0.0,
        }
    }

    /// Draw the next unit's duration and start serving it.
    fn begin_unit(&mut self, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        let i = self.station.index();
        let Some(duration) = self.service.sample(ctx.world.rngs.get_mut(self.station)) else {
            debug!(station = %self.station, "service time never elapses; loop stopped");
            self.phase = Phase::Idle;
            return Wait::Exit;
        };
        self.remaining = duration;
        ctx.world.stations.remaining[i] = duration;
        self.phase = Phase::Serving { started: ctx.now() };
        Wait::Timeout(duration)
    }

    fn complete_unit(&mut self, ctx: &mut Ctx<'_, Terminal>) {
        let i = self.station.index();
        let now = ctx.now();
        let stations = &mut ctx.world.stations;
        stations.completed[i] += 1;
        stations.last_completed_at[i] = Some(now);
        stations.remaining[i] = 0.0;
        self.remaining = 0.0;
        trace!(station = %self.station, time = now.as_f64(), completed = stations.completed[i], "unit completed");
    }

    /// Resume the interrupted unit, or finish it on the spot if no work is
    /// left.
    fn resume_unit(&mut self, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        if self.remaining > 0.0 {
            self.phase = Phase::Serving { started: ctx.now() };
            Wait::Timeout(self.remaining)
        } else {
            self.complete_unit(ctx);
            self.begin_unit(ctx)
        }
    }
}

impl Process<Terminal> for ServiceLoop {
    fn resume(&mut self, wake: Wake, ctx: &mut Ctx<'_, Terminal>) -> Wait {
        let i = self.station.index();
        match (wake, self.phase) {
            (Wake::Start, _) => self.begin_unit(ctx),

            (Wake::Timeout, Phase::Serving { .. }) => {
                self.complete_unit(ctx);
                self.begin_unit(ctx)
            }

            (Wake::Interrupted(interrupt), Phase::Serving { started }) => {
                let now = ctx.now();
                let worked = now.since(started);
                self.remaining = (self.remaining - worked).max(0.0);
                ctx.world.stations.remaining[i] = self.remaining;
                ctx.world.stations.broken[i] = true;
                debug!(
                    station = %self.station,
                    reason = interrupt.reason,
                    elapsed = interrupt.elapsed,
                    remaining = self.remaining,
                    "station broke down"
                );
                self.phase = Phase::Repairing { until: now + self.repair };
                Wait::Timeout(self.repair)
            }

            (Wake::Timeout, Phase::Repairing { .. }) => {
                ctx.world.stations.broken[i] = false;
                debug!(station = %self.station, remaining = self.remaining, "station repaired");
                self.resume_unit(ctx)
            }

            // A failure during a repair leaves the repair schedule and the
            // owed work untouched.
            (Wake::Interrupted(interrupt), Phase::Repairing { until }) => {
                debug!(
                    station = %self.station,
                    reason = interrupt.reason,
                    "interrupted while under repair; ignored"
                );
                Wait::Timeout(until.since(ctx.now()).max(0.0))
            }

            (wake, phase) => {
                warn!(station = %self.station, wake = wake.label(), ?phase, "unexpected wake; restarting unit");
                self.begin_unit(ctx)
            }
        }
    }

    fn label(&self) -> &str {
        "service-loop"
    }
}
