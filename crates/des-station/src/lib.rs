//! `des-station`: failing server stations and passenger journeys on the
//! des kernel.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`params`]    | `StationParams`: service, failure, repair                   |
//! | [`kind`]      | `StationKind` and the reference airport table               |
//! | [`store`]     | `StationStore` (SoA status + counters), `StationRngs`       |
//! | [`service`]   | `ServiceLoop`: serve units, carry remainders across repairs |
//! | [`failure`]   | `FailureGenerator`, `try_fail`                              |
//! | [`journey`]   | `PassengerSource`, `Passenger`, `JourneyLog`                |
//! | [`terminal`]  | `Terminal` world, `TerminalBuilder`, `run_terminal`         |
//! | [`config`]    | `TerminalConfig`: JSON configuration and validation         |
//! | [`report`]    | `TerminalReport`, `StationReport`, `summarize`              |
//! | [`replicate`] | Seeded replications, optionally on Rayon                    |
//! | [`error`]     | `StationError`, `StationResult<T>`                          |
//!
//! # Server-entity pattern
//!
//! Every station is two processes sharing one status record:
//!
//! - the **service loop** serves units back to back; a failure interrupts
//!   the unit in progress, the loop sits out a fixed repair, then finishes
//!   the same unit;
//! - the **failure generator** sleeps for a time-to-failure draw and then
//!   interrupts the loop, unless the station is already broken, in which
//!   case the attempt is dropped and counted in `suppressed`.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`replicate`] runs replications on Rayon's thread pool |

pub mod config;
pub mod error;
pub mod failure;
pub mod journey;
pub mod kind;
pub mod params;
pub mod replicate;
pub mod report;
pub mod service;
pub mod store;
pub mod terminal;


pub use config::{CounterDef, PassengerFlow, RouteStep, StationGroup, TerminalConfig};
pub use error::{StationError, StationResult};
pub use failure::{BREAKDOWN, FailOutcome, FailureGenerator, try_fail};
pub use journey::{JourneyLog, JourneyStep, Passenger, PassengerSource};
pub use kind::StationKind;
pub use params::StationParams;
pub use replicate::{replicate, replication_seeds};
pub use report::{KindSummary, StationReport, TerminalReport, summarize};
pub use service::ServiceLoop;
pub use store::{StationRngs, StationStore};
pub use terminal::{Terminal, TerminalBuilder, add_station, run_terminal};
