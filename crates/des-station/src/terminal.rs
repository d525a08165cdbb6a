//! The airport world and the builder that populates a `Sim` with it.

use des_core::{EntityRng, ResourceId, StationId};
use des_kernel::{Sim, SimObserver};
use tracing::info;

use crate::{
    FailureGenerator, JourneyLog, JourneyStep, PassengerSource, ServiceLoop, StationError,
    StationKind, StationParams, StationResult, StationRngs, StationStore, TerminalConfig,
    TerminalReport,
};

/// RNG stream reserved for the passenger flow, well clear of station indices.
const PASSENGER_STREAM: u64 = 1 << 40;

/// Shared state of one airport run, handed to every process as `ctx.world`.
pub struct Terminal {
    pub stations:    StationStore,
    pub rngs:        StationRngs,
    pub journeys:    JourneyLog,
    pub journey_rng: EntityRng,
    /// Counter resources by name, in declaration order.
    pub counters:    Vec<(String, ResourceId)>,
}

impl Terminal {
    pub fn new(global_seed: u64) -> Self {
        Self {
            stations:    StationStore::new(),
            rngs:        StationRngs::new(),
            journeys:    JourneyLog::default(),
            journey_rng: EntityRng::new(global_seed, PASSENGER_STREAM),
            counters:    Vec::new(),
        }
    }

    pub fn counter(&self, name: &str) -> Option<ResourceId> {
        self.counters.iter().find(|(n, _)| n == name).map(|&(_, id)| id)
    }
}

/// Add one station to `sim` and start its two processes: the service loop
/// first, then the failure generator, both at the current time.
pub fn add_station(
    sim: &mut Sim<Terminal>,
    kind: StationKind,
    name: String,
    params: &StationParams,
) -> StationResult<StationId> {
    params.validate(&name)?;
    let seed = sim.config.seed;
    let station = sim.world.stations.push(kind, name);
    sim.world.rngs.push(seed);

    let service = sim.spawn(ServiceLoop::new(station, params))?;
    sim.world.stations.service_process[station.index()] = service;
    sim.spawn(FailureGenerator::new(station, params.failure))?;
    Ok(station)
}

// ── TerminalBuilder ───────────────────────────────────────────────────────────

/// Fluent constructor for a ready-to-run airport `Sim`.
///
/// ```rust,ignore
/// let mut sim = TerminalBuilder::new(TerminalConfig::airport_default())
///     .seed(7)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct TerminalBuilder {
    config: TerminalConfig,
}

impl TerminalBuilder {
    pub fn new(config: TerminalConfig) -> Self {
        Self { config }
    }

    /// Override the configured seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Override the configured horizon.
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.config.horizon = horizon;
        self
    }

    /// Validate the configuration and spawn every process.
    ///
    /// Stations are created kind by kind in configuration order and named
    /// "<label> <n>" with `n` counting from 1 within each entry.
    pub fn build(self) -> StationResult<Sim<Terminal>> {
        self.config.validate()?;
        let mut sim = Sim::new(self.config.sim_config(), Terminal::new(self.config.seed))?;

        for group in &self.config.stations {
            let params = group.params();
            for n in 1..=group.count {
                add_station(&mut sim, group.kind, format!("{} {n}", group.kind.label()), &params)?;
            }
        }

        if let Some(flow) = &self.config.passengers {
            for counter in &flow.counters {
                let id = sim.add_resource(counter.capacity)?;
                sim.world.counters.push((counter.name.clone(), id));
            }
            let steps = flow
                .steps
                .iter()
                .map(|step| {
                    let counter = sim.world.counter(&step.counter).ok_or_else(|| {
                        StationError::Config(format!("unknown counter `{}`", step.counter))
                    })?;
                    Ok(JourneyStep { counter, service: step.service() })
                })
                .collect::<StationResult<Vec<_>>>()?;
            sim.spawn(PassengerSource::new(flow.interarrival(), steps))?;
        }

        info!(
            seed = self.config.seed,
            stations = sim.world.stations.len(),
            counters = sim.world.counters.len(),
            "terminal built"
        );
        Ok(sim)
    }
}

/// Build, run to the horizon and report.
pub fn run_terminal<O: SimObserver>(config: &TerminalConfig, observer: &mut O) -> StationResult<TerminalReport> {
    let mut sim = TerminalBuilder::new(config.clone()).build()?;
    sim.run(observer)?;
    Ok(TerminalReport::from_sim(&sim))
}
