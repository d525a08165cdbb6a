//! `des-core`: foundational types for the `des` discrete-event workspace.
//!
//! This crate is a dependency of every other `des-*` crate.  It has no
//! `des-*` dependencies and minimal external ones (`rand`, `rand_distr` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                     |
//! |-----------|----------------------------------------------|
//! | [`ids`]   | `ProcessId`, `ResourceId`, `StationId`       |
//! | [`time`]  | `SimTime`, `SimConfig`                       |
//! | [`rng`]   | `EntityRng` (per-entity), `SimRng` (per-run) |
//! | [`dist`]  | `Dist` duration samplers, `MIN_DURATION`     |
//! | [`error`] | `DesError`, `DesResult`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod dist;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dist::{Dist, MIN_DURATION};
pub use error::{DesError, DesResult};
pub use ids::{ProcessId, ResourceId, StationId};
pub use rng::{EntityRng, SimRng};
pub use time::{SimConfig, SimTime};
