//! Virtual time model.
//!
//! # Design
//!
//! Time is a continuous `f64` scalar wrapped in [`SimTime`].  Service and
//! failure durations are drawn from continuous distributions, so an integer
//! tick would force rounding into every sample.  Instead `SimTime` carries a
//! total order (`f64::total_cmp`) so it can key a `BTreeMap` directly, and the
//! kernel refuses to schedule anything that is not finite.
//!
//! The unit is whatever the configuration says it is; the airport model uses
//! minutes.

use std::cmp::Ordering;
use std::fmt;

use crate::{DesError, DesResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point on the virtual timeline.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// `Some` only for finite values.
    #[inline]
    pub fn new(t: f64) -> Option<SimTime> {
        t.is_finite().then_some(SimTime(t))
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Return the time `d` units after `self`.
    #[inline]
    pub fn offset(self, d: f64) -> SimTime {
        SimTime(self.0 + d)
    }

    /// Units elapsed from `earlier` to `self`.  Negative if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for SimTime {
    fn from(t: f64) -> Self {
        SimTime(t)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Per-run kernel configuration.
///
/// Model-level configuration (station tables, passenger flows) lives in
/// `des-station`; this is only what the scheduler itself needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Last virtual time processed.  Events scheduled exactly at the horizon
    /// are dispatched; anything later is discarded when the run stops.
    pub horizon: SimTime,
}

impl SimConfig {
    pub fn new(seed: u64, horizon: f64) -> Self {
        Self { seed, horizon: SimTime(horizon) }
    }

    /// Reject horizons that are non-finite or not strictly positive.
    pub fn validate(&self) -> DesResult<()> {
        if !self.horizon.is_finite() || self.horizon.0 <= 0.0 {
            return Err(DesError::Config(format!(
                "horizon must be a positive finite time, got {}",
                self.horizon.0
            )));
        }
        Ok(())
    }
}
