//! End-of-run summaries.

use std::fmt;

use des_core::{SimTime, StationId};
use des_kernel::Sim;

use crate::{JourneyLog, StationKind, Terminal};

/// Final counters of one station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationReport {
    pub station:    StationId,
    pub name:       String,
    pub kind:       StationKind,
    pub completed:  u64,
    pub failures:   u64,
    pub suppressed: u64,
}

/// One console line: name, completions and the kind's unit, e.g.
/// `Security lane 3: 812 passengers screened`.
impl fmt::Display for StationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.completed, self.kind.unit_verb())
    }
}

/// Everything a finished run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalReport {
    pub seed:       u64,
    pub end_time:   SimTime,
    pub dispatched: u64,
    pub stations:   Vec<StationReport>,
    /// `None` when the run had no passenger flow.
    pub journeys:   Option<JourneyLog>,
}

impl TerminalReport {
    pub fn from_sim(sim: &Sim<Terminal>) -> Self {
        let store = &sim.world.stations;
        let stations = store
            .ids()
            .map(|s| {
                let i = s.index();
                StationReport {
                    station:    s,
                    name:       store.name[i].clone(),
                    kind:       store.kind[i],
                    completed:  store.completed[i],
                    failures:   store.failures[i],
                    suppressed: store.suppressed[i],
                }
            })
            .collect();
        let journeys = (!sim.world.counters.is_empty()).then(|| sim.world.journeys.clone());
        Self {
            seed: sim.config.seed,
            end_time: sim.now(),
            dispatched: sim.dispatched(),
            stations,
            journeys,
        }
    }

    /// Stations of `kind`, in creation order.
    pub fn stations_of(&self, kind: StationKind) -> impl Iterator<Item = &StationReport> + '_ {
        self.stations.iter().filter(move |s| s.kind == kind)
    }

    pub fn completed_by_kind(&self, kind: StationKind) -> u64 {
        self.stations_of(kind).map(|s| s.completed).sum()
    }

    pub fn failures_by_kind(&self, kind: StationKind) -> u64 {
        self.stations_of(kind).map(|s| s.failures).sum()
    }

    /// Kinds present in this run, in [`StationKind::ALL`] order.
    pub fn kinds(&self) -> Vec<StationKind> {
        StationKind::ALL
            .into_iter()
            .filter(|k| self.stations.iter().any(|s| s.kind == *k))
            .collect()
    }
}

// ── Replication summaries ─────────────────────────────────────────────────────

/// Spread of one kind's completions across replications.
#[derive(Clone, Debug, PartialEq)]
pub struct KindSummary {
    pub kind: StationKind,
    pub mean: f64,
    pub min:  u64,
    pub max:  u64,
}

/// Per-kind completion statistics over a set of replications.
pub fn summarize(reports: &[TerminalReport]) -> Vec<KindSummary> {
    let Some(first) = reports.first() else {
        return Vec::new();
    };
    first
        .kinds()
        .into_iter()
        .map(|kind| {
            let totals: Vec<u64> = reports.iter().map(|r| r.completed_by_kind(kind)).collect();
            KindSummary {
                kind,
                mean: totals.iter().sum::<u64>() as f64 / totals.len() as f64,
                min:  totals.iter().copied().min().unwrap_or(0),
                max:  totals.iter().copied().max().unwrap_or(0),
            }
        })
        .collect()
}
