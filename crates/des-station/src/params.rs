//! Per-station timing parameters.

use des_core::{DesResult, Dist};

/// The four numbers that define a server entity's behaviour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StationParams {
    /// Service duration per unit.
    pub service: Dist,
    /// Time between failure attempts.  [`Dist::Never`] disables failures.
    pub failure: Dist,
    /// Fixed time a repair takes.
    pub repair:  f64,
}

impl StationParams {
    /// Gaussian service, exponential failures; the shape every airport
    /// station uses.
    pub fn gaussian(mean_service: f64, spread: f64, mean_time_to_failure: f64, repair: f64) -> Self {
        Self {
            service: Dist::normal(mean_service, spread),
            failure: Dist::exponential(mean_time_to_failure),
            repair,
        }
    }

    /// Same station with its failure generator switched off.
    pub fn without_failures(mut self) -> Self {
        self.failure = Dist::Never;
        self
    }

    pub fn validate(&self, what: &str) -> DesResult<()> {
        if matches!(self.service, Dist::Never) {
            return Err(des_core::DesError::Config(format!(
                "{what}: service time distribution cannot be `never`"
            )));
        }
        self.service.validate(&format!("{what}: service time"))?;
        self.failure.validate(&format!("{what}: time to failure"))?;
        if !(self.repair.is_finite() && self.repair > 0.0) {
            return Err(des_core::DesError::Config(format!(
                "{what}: repair duration must be positive, got {}",
                self.repair
            )));
        }
        Ok(())
    }
}
