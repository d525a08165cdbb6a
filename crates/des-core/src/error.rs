//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `DesError` as one
//! variant (see `des-station`), or convert into it via `From`.

use thiserror::Error;

/// The top-level error type for `des-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DesError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `des-*` crates.
pub type DesResult<T> = Result<T, DesError>;
