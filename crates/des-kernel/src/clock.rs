//! The monotonic virtual clock.

use des_core::SimTime;

use crate::{KernelError, KernelResult};

/// Single non-decreasing `now`.  Only the [`EventQueue`][crate::EventQueue]
/// moves it.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    now: SimTime,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `to`.  Staying put is allowed; going back is not.
    pub fn advance_to(&mut self, to: SimTime) -> KernelResult<()> {
        if to < self.now || !to.is_finite() {
            return Err(KernelError::ClockRegression { from: self.now, to });
        }
        self.now = to;
        Ok(())
    }
}
