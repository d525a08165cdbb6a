//! JSON run configuration.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "horizon": 40320.0,
//!   "stations": [
//!     { "kind": "security_lane", "count": 7,
//!       "mean_service_time": 30.0, "service_time_spread": 6.0,
//!       "mean_time_to_failure": 270.0, "fixed_repair_duration": 100.0 }
//!   ],
//!   "passengers": {
//!     "mean_interarrival": 2.0,
//!     "counters": [ { "name": "check-in", "capacity": 4 } ],
//!     "steps": [ { "counter": "check-in",
//!                  "mean_service_time": 6.0, "service_time_spread": 1.5 } ]
//!   }
//! }
//! ```
//!
//! Omitting `mean_time_to_failure` disables failures for that station kind;
//! omitting `passengers` runs the stations alone.

use std::collections::HashSet;
use std::path::Path;

use des_core::{Dist, SimConfig};
use serde::{Deserialize, Serialize};

use crate::{StationError, StationKind, StationParams, StationResult};

/// Four weeks of minutes.
pub const DEFAULT_HORIZON: f64 = 4.0 * 7.0 * 24.0 * 60.0;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminalConfig {
    pub seed:       u64,
    pub horizon:    f64,
    pub stations:   Vec<StationGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<PassengerFlow>,
}

/// Instance count and parameters for one station kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationGroup {
    pub kind:                  StationKind,
    pub count:                 u32,
    pub mean_service_time:     f64,
    pub service_time_spread:   f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_time_to_failure:  Option<f64>,
    pub fixed_repair_duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassengerFlow {
    pub mean_interarrival: f64,
    pub counters:          Vec<CounterDef>,
    pub steps:             Vec<RouteStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterDef {
    pub name:     String,
    pub capacity: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteStep {
    pub counter:             String,
    pub mean_service_time:   f64,
    pub service_time_spread: f64,
}

// ── StationGroup ──────────────────────────────────────────────────────────────

impl StationGroup {
    /// The reference airport's entry for `kind`.
    pub fn for_kind(kind: StationKind) -> Self {
        let params = kind.default_params();
        let (mean, spread) = match params.service {
            Dist::Normal { mean, spread } => (mean, spread),
            other => (other.mean().unwrap_or(0.0), 0.0),
        };
        Self {
            kind,
            count:                 kind.default_count(),
            mean_service_time:     mean,
            service_time_spread:   spread,
            mean_time_to_failure:  params.failure.mean(),
            fixed_repair_duration: params.repair,
        }
    }

    pub fn params(&self) -> StationParams {
        StationParams {
            service: Dist::normal(self.mean_service_time, self.service_time_spread),
            failure: self.mean_time_to_failure.map_or(Dist::Never, Dist::exponential),
            repair:  self.fixed_repair_duration,
        }
    }

    fn validate(&self, index: usize) -> StationResult<()> {
        let what = format!("stations[{index}] ({})", self.kind.label());
        if self.count == 0 {
            return Err(StationError::Config(format!("{what}: count must be at least 1")));
        }
        self.params().validate(&what)?;
        Ok(())
    }
}

impl RouteStep {
    pub fn service(&self) -> Dist {
        Dist::normal(self.mean_service_time, self.service_time_spread)
    }
}

// ── TerminalConfig ────────────────────────────────────────────────────────────

impl TerminalConfig {
    /// The reference airport: every station kind with its default count and
    /// parameters, four weeks, seed 42, no passenger flow.
    pub fn airport_default() -> Self {
        Self {
            seed:       DEFAULT_SEED,
            horizon:    DEFAULT_HORIZON,
            stations:   StationKind::ALL.iter().map(|&k| StationGroup::for_kind(k)).collect(),
            passengers: None,
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig::new(self.seed, self.horizon)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> StationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> StationResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> StationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject anything the run could not honour: a bad horizon, an empty or
    /// non-positive station entry, or a passenger route that names a counter
    /// that does not exist.
    pub fn validate(&self) -> StationResult<()> {
        self.sim_config().validate()?;
        if self.stations.is_empty() && self.passengers.is_none() {
            return Err(StationError::Config(
                "nothing to simulate: no stations and no passenger flow".into(),
            ));
        }
        for (i, group) in self.stations.iter().enumerate() {
            group.validate(i)?;
        }
        if let Some(flow) = &self.passengers {
            flow.validate()?;
        }
        Ok(())
    }
}

// ── PassengerFlow ─────────────────────────────────────────────────────────────

impl PassengerFlow {
    pub fn interarrival(&self) -> Dist {
        Dist::exponential(self.mean_interarrival)
    }

    fn validate(&self) -> StationResult<()> {
        self.interarrival().validate("passengers: interarrival time")?;

        let mut names = HashSet::new();
        for (i, counter) in self.counters.iter().enumerate() {
            if counter.capacity == 0 {
                return Err(StationError::Config(format!(
                    "passengers.counters[{i}] ({}): capacity must be at least 1",
                    counter.name
                )));
            }
            if !names.insert(counter.name.as_str()) {
                return Err(StationError::Config(format!(
                    "passengers.counters[{i}]: duplicate counter name `{}`",
                    counter.name
                )));
            }
        }

        if self.steps.is_empty() {
            return Err(StationError::Config("passengers.steps: route is empty".into()));
        }
        for (i, step) in self.steps.iter().enumerate() {
            if !names.contains(step.counter.as_str()) {
                return Err(StationError::Config(format!(
                    "passengers.steps[{i}]: unknown counter `{}`",
                    step.counter
                )));
            }
            step.service().validate(&format!("passengers.steps[{i}]: service time"))?;
        }
        Ok(())
    }
}
