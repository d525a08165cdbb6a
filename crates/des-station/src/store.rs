//! Station storage: `StationStore` (SoA state) and `StationRngs` (per-station RNG).
//!
//! The RNGs sit in their own struct so a process body can hold
//! `&mut world.rngs` and `&mut world.stations` at the same time:
//!
//! ```ignore
//! let d = params.service.sample(world.rngs.get_mut(id));
//! world.stations.remaining[id.index()] = d;
//! ```

use des_core::{EntityRng, ProcessId, SimTime, StationId};

use crate::StationKind;

// ── StationRngs ───────────────────────────────────────────────────────────────

/// One deterministic RNG per station, seeded from the run seed and the
/// station's index.  The service loop and the failure generator of a station
/// draw from the same stream in dispatch order.
pub struct StationRngs {
    pub inner: Vec<EntityRng>,
}

impl StationRngs {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Append the RNG for the next station index.
    pub(crate) fn push(&mut self, global_seed: u64) {
        let stream = self.inner.len() as u64;
        self.inner.push(EntityRng::new(global_seed, stream));
    }

    #[inline]
    pub fn get_mut(&mut self, station: StationId) -> &mut EntityRng {
        &mut self.inner[station.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for StationRngs {
    fn default() -> Self {
        Self::new()
    }
}

// ── StationStore ──────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all station state.
///
/// Every `Vec` has exactly `count` elements and `StationId` indexes them all.
pub struct StationStore {
    /// Number of stations.
    pub count: usize,

    pub kind: Vec<StationKind>,
    /// Instance name, e.g. "Security lane 3".
    pub name: Vec<String>,

    // ── Status ────────────────────────────────────────────────────────────
    /// `true` from the moment a failure lands until the repair completes.
    /// Failure generators read it to decide whether to interrupt.
    pub broken: Vec<bool>,

    /// Service time still owed on the current unit.  Survives any number of
    /// interruptions; zero between units.
    pub remaining: Vec<f64>,

    /// The station's service-loop process.  `ProcessId::INVALID` until the
    /// loop is spawned.
    pub service_process: Vec<ProcessId>,

    // ── Counters ──────────────────────────────────────────────────────────
    /// Units completed.
    pub completed: Vec<u64>,

    /// Failures delivered (each one started a repair).
    pub failures: Vec<u64>,

    /// Failure attempts dropped because the station was already broken.
    pub suppressed: Vec<u64>,

    /// Time of the most recent completion.
    pub last_completed_at: Vec<Option<SimTime>>,
}

impl StationStore {
    pub fn new() -> Self {
        Self {
            count:             0,
            kind:              Vec::new(),
            name:              Vec::new(),
            broken:            Vec::new(),
            remaining:         Vec::new(),
            service_process:   Vec::new(),
            completed:         Vec::new(),
            failures:          Vec::new(),
            suppressed:        Vec::new(),
            last_completed_at: Vec::new(),
        }
    }

    /// Append a station in the idle, working state.
    pub(crate) fn push(&mut self, kind: StationKind, name: String) -> StationId {
        let id = StationId(self.count as u32);
        self.kind.push(kind);
        self.name.push(name);
        self.broken.push(false);
        self.remaining.push(0.0);
        self.service_process.push(ProcessId::INVALID);
        self.completed.push(0);
        self.failures.push(0);
        self.suppressed.push(0);
        self.last_completed_at.push(None);
        self.count += 1;
        id
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Iterator over all valid `StationId`s.
    pub fn ids(&self) -> impl Iterator<Item = StationId> {
        (0..self.count as u32).map(StationId)
    }

    /// Stations of one kind, in creation order.
    pub fn ids_of(&self, kind: StationKind) -> impl Iterator<Item = StationId> + '_ {
        self.ids().filter(move |s| self.kind[s.index()] == kind)
    }
}

impl Default for StationStore {
    fn default() -> Self {
        Self::new()
    }
}
