//! Duration samplers.
//!
//! Every duration a process waits for (service, inter-failure, inter-arrival)
//! is drawn from a [`Dist`].  Samples are always strictly positive: a
//! non-positive draw (possible with a wide Gaussian) is clamped to
//! [`MIN_DURATION`].  Clamping rather than redrawing keeps the number of RNG
//! draws per sample fixed at one, so a given seed yields the same stream
//! regardless of parameter values.

use rand_distr::{Exp1, StandardNormal};

use crate::{DesError, DesResult, EntityRng};

/// Smallest duration ever returned by [`Dist::sample`].
pub const MIN_DURATION: f64 = 1e-6;

/// A distribution of positive durations.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Dist {
    /// Always `value`.
    Fixed { value: f64 },

    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, spread: f64 },

    /// Exponential inter-arrival with the given mean (rate = 1 / mean).
    Exponential { mean: f64 },

    /// Never fires.  `sample` returns `None`.
    Never,
}

impl Dist {
    pub fn fixed(value: f64) -> Self {
        Dist::Fixed { value }
    }

    pub fn normal(mean: f64, spread: f64) -> Self {
        Dist::Normal { mean, spread }
    }

    pub fn exponential(mean: f64) -> Self {
        Dist::Exponential { mean }
    }

    /// Check parameters.  `what` names the field in the diagnostic.
    pub fn validate(&self, what: &str) -> DesResult<()> {
        let bad = |msg: String| -> DesResult<()> {
            Err(DesError::Config(format!("{what}: {msg}")))
        };
        match *self {
            Dist::Fixed { value } if !(value.is_finite() && value > 0.0) => {
                bad(format!("fixed duration must be positive, got {value}"))
            }
            Dist::Normal { mean, .. } if !(mean.is_finite() && mean > 0.0) => {
                bad(format!("mean must be positive, got {mean}"))
            }
            Dist::Normal { spread, .. } if !(spread.is_finite() && spread >= 0.0) => {
                bad(format!("spread must be non-negative, got {spread}"))
            }
            Dist::Exponential { mean } if !(mean.is_finite() && mean > 0.0) => {
                bad(format!("mean must be positive, got {mean}"))
            }
            _ => Ok(()),
        }
    }

    /// Draw one duration, or `None` for [`Dist::Never`].
    pub fn sample(&self, rng: &mut EntityRng) -> Option<f64> {
        let raw = match *self {
            Dist::Fixed { value } => value,
            Dist::Normal { mean, spread } => {
                let z: f64 = rng.sample(StandardNormal);
                mean + spread * z
            }
            Dist::Exponential { mean } => {
                let e: f64 = rng.sample(Exp1);
                mean * e
            }
            Dist::Never => return None,
        };
        Some(clamp_duration(raw))
    }

    /// Expected value, `None` for [`Dist::Never`].
    pub fn mean(&self) -> Option<f64> {
        match *self {
            Dist::Fixed { value } => Some(value),
            Dist::Normal { mean, .. } | Dist::Exponential { mean } => Some(mean),
            Dist::Never => None,
        }
    }
}

/// Clamp a raw draw into `[MIN_DURATION, ∞)`.  NaN also maps to `MIN_DURATION`.
#[inline]
pub fn clamp_duration(raw: f64) -> f64 {
    if raw > MIN_DURATION { raw } else { MIN_DURATION }
}
