//! `des-kernel`: discrete-event simulation kernel for the des workspace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                           |
//! |--------------|--------------------------------------------------------------------|
//! | [`clock`]    | `Clock`: the monotonic virtual clock                               |
//! | [`event`]    | `EventQueue` (`BTreeMap<(time, seq), Event>`), `Wake`, `Interrupt` |
//! | [`process`]  | `Process` trait, `Wait`, `ProcessState`                            |
//! | [`resource`] | `Resource`, `ResourceTable`: capacity + FIFO queue                 |
//! | [`context`]  | `Ctx`: per-step handle given to a resumed process                  |
//! | [`sim`]      | `Sim`: the dispatch loop                                           |
//! | [`observer`] | `SimObserver`, `NoopObserver`                                      |
//! | [`error`]    | `KernelError`, `KernelResult<T>`                                   |
//!
//! # Scheduling model (summary)
//!
//! ```text
//! loop:
//!   (t, seq, event) = queue.pop_earliest()     // stop if t > horizon
//!   clock = t
//!   wait = process[event.target].resume(event.wake, ctx)
//!   match wait:
//!     Timeout(d)   → schedule Wake::Timeout at t + d   (interruptible)
//!     Acquire(r)   → grant now or join r's FIFO queue
//!     Exit         → terminate
//! ```
//!
//! Only one process body runs at a time and it runs from one suspension
//! point to the next without interleaving, so the world needs no locking.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use des_core::SimConfig;
//! use des_kernel::{NoopObserver, Sim};
//!
//! let mut sim = Sim::new(SimConfig::new(42, 1_000.0), MyWorld::default())?;
//! sim.spawn(MyProcess::new())?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod clock;
pub mod context;
pub mod error;
pub mod event;
mod kernel;
pub mod observer;
pub mod process;
pub mod resource;
pub mod sim;

#[cfg(test)]
mod tests;

pub use clock::Clock;
pub use context::Ctx;
pub use error::{KernelError, KernelResult};
pub use event::{Event, EventKey, EventQueue, Interrupt, Wake};
pub use observer::{NoopObserver, SimObserver};
pub use process::{Process, ProcessState, Wait, WaitKind};
pub use resource::{Request, Resource, ResourceTable};
pub use sim::Sim;
