use des_core::DesError;
use des_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] DesError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StationResult<T> = Result<T, StationError>;
