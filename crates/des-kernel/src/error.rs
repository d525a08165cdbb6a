use des_core::{DesError, ProcessId, ResourceId, SimTime};
use thiserror::Error;

/// Kernel invariant violations.  All of them abort the run.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("event scheduled at {at} which is before the current clock {now}")]
    ScheduleInPast { at: SimTime, now: SimTime },

    #[error("{process} requested a timeout of {duration}, which is not a finite duration")]
    InvalidDuration { process: ProcessId, duration: f64 },

    #[error("clock cannot move backward from {from} to {to}")]
    ClockRegression { from: SimTime, to: SimTime },

    #[error("{process} released {resource} without holding a slot")]
    OverRelease { process: ProcessId, resource: ResourceId },

    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),

    #[error("unknown process {0}")]
    UnknownProcess(ProcessId),

    #[error("resource capacity must be at least 1")]
    InvalidCapacity,

    #[error("simulation was aborted by an earlier kernel error")]
    Poisoned,

    #[error(transparent)]
    Config(#[from] DesError),
}

pub type KernelResult<T> = Result<T, KernelError>;
