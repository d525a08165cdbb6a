//! Independent replications of one configuration.
//!
//! Replication `k` runs the configuration with a seed derived from the base
//! seed, so replications differ from one another but the whole set is
//! reproducible.  With the `parallel` feature each replication builds and
//! runs its own `Sim` on a Rayon worker; nothing is shared between them.

use des_core::SimRng;
use des_kernel::NoopObserver;
use tracing::info;

use crate::{StationResult, TerminalConfig, TerminalReport, run_terminal};

/// Seeds for `count` replications of a run seeded with `base`.
///
/// Replication 0 keeps `base` itself so a single replication matches a
/// plain run.
pub fn replication_seeds(base: u64, count: usize) -> Vec<u64> {
    let mut rng = SimRng::new(base);
    (0..count as u64)
        .map(|k| if k == 0 { base } else { rng.child_seed(k) })
        .collect()
}

/// Run `count` replications and return their reports in replication order.
pub fn replicate(config: &TerminalConfig, count: usize) -> StationResult<Vec<TerminalReport>> {
    config.validate()?;
    let configs: Vec<TerminalConfig> = replication_seeds(config.seed, count)
        .into_iter()
        .map(|seed| TerminalConfig { seed, ..config.clone() })
        .collect();
    info!(count, base_seed = config.seed, "running replications");

    #[cfg(not(feature = "parallel"))]
    {
        configs
            .iter()
            .map(|c| run_terminal(c, &mut NoopObserver))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        configs
            .par_iter()
            .map(|c| run_terminal(c, &mut NoopObserver))
            .collect()
    }
}
