//! Multi-episode driver: repeated fires on one evolving grid
//!
//! A model run owns a single grid for its whole lifetime. Warm-up episodes
//! let the tree density settle into its statistical steady state before any
//! results are kept.

use crate::grid::ForestGrid;
use crate::params::{ConfigError, SimulationParameters};
use crate::simulation::run_fire_episode;
use crate::stats::FireEpisodeResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Final grid and kept episode records of one model run.
#[derive(Debug)]
pub struct ModelRun {
    /// Grid state after the last measured episode.
    pub grid: ForestGrid,
    /// One record per measured episode, in execution order.
    pub records: Vec<FireEpisodeResult>,
}

/// Run `episodes` fire episodes in sequence on the same mutating grid and
/// collect their records in order.
pub fn run_fire_sequence<R: Rng>(
    grid: &mut ForestGrid,
    episodes: usize,
    regrowth: f64,
    rng: &mut R,
) -> Vec<FireEpisodeResult> {
    (0..episodes)
        .map(|_| run_fire_episode(grid, regrowth, rng))
        .collect()
}

/// Run one complete model replicate from an explicit seed.
///
/// Builds a fresh random grid, runs the warm-up episodes with their results
/// discarded, then the measured episodes whose records are returned together
/// with the final grid. Identical parameters and seed always reproduce the
/// identical run, whether invoked directly or from the parallel harness.
///
/// # Errors
///
/// Returns [`ConfigError`] when the parameters fail validation.
pub fn run_model(params: &SimulationParameters, seed: u64) -> Result<ModelRun, ConfigError> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = ForestGrid::random(params.grid_size, params.tree_density, &mut rng);

    // Warm-up: reach steady-state tree cover, results discarded
    let _ = run_fire_sequence(
        &mut grid,
        params.warmup_fires,
        params.regrowth_probability,
        &mut rng,
    );

    let records = run_fire_sequence(
        &mut grid,
        params.measured_fires,
        params.regrowth_probability,
        &mut rng,
    );
    Ok(ModelRun { grid, records })
}
