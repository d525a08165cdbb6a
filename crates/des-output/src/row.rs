//! Plain data row types written by output backends.

use des_station::{JourneyLog, StationReport};

/// Final counters of one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRow {
    /// Instance name, e.g. "Security lane 3".
    pub station:    String,
    /// Snake-case kind, matching the configuration file.
    pub kind:       &'static str,
    pub completed:  u64,
    pub failures:   u64,
    pub suppressed: u64,
}

impl From<&StationReport> for StationRow {
    fn from(report: &StationReport) -> Self {
        Self {
            station:    report.name.clone(),
            kind:       report.kind.key(),
            completed:  report.completed,
            failures:   report.failures,
            suppressed: report.suppressed,
        }
    }
}

/// One-line passenger summary.  Means are NaN before the first departure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JourneyRow {
    pub arrived:             u64,
    pub departed:            u64,
    pub in_system:           u64,
    pub mean_wait:           f64,
    pub max_wait:            f64,
    pub mean_time_in_system: f64,
}

impl From<&JourneyLog> for JourneyRow {
    fn from(log: &JourneyLog) -> Self {
        Self {
            arrived:             log.arrived,
            departed:            log.departed,
            in_system:           log.in_system(),
            mean_wait:           log.mean_wait().unwrap_or(f64::NAN),
            max_wait:            log.max_wait,
            mean_time_in_system: log.mean_time_in_system().unwrap_or(f64::NAN),
        }
    }
}

/// One dispatched event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub time:    f64,
    pub seq:     u64,
    pub process: u32,
    pub wake:    &'static str,
}
