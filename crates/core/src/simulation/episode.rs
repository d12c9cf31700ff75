//! Single fire episode: lightning strike, propagation, extinction
//!
//! An episode runs on a persistent grid. Regrowth keeps acting while the
//! fire propagates and between episodes, so consecutive episodes on the
//! same grid are deliberately dependent: each one starts from the state the
//! previous one left behind.

use crate::grid::{CellState, ForestGrid};
use crate::simulation::step_forest;
use crate::stats::FireEpisodeResult;
use rand::Rng;
use tracing::debug;

/// Ignite one uniformly chosen tree cell.
///
/// Returns the struck coordinates, or `None` when the grid holds no trees
/// (nothing to ignite; the grid is left untouched).
pub fn lightning_strike<R: Rng>(grid: &mut ForestGrid, rng: &mut R) -> Option<(usize, usize)> {
    let sites = grid.tree_sites();
    if sites.is_empty() {
        return None;
    }
    let (x, y) = sites[rng.random_range(0..sites.len())];
    grid.set(x, y, CellState::Burning);
    Some((x, y))
}

/// Run the propagation loop on an already-ignited grid until no cell burns.
///
/// The burned total starts from the cells burning at entry and accumulates
/// the burning count after every step; the duration counts the steps taken.
/// On a grid with nothing burning this returns immediately with zeros.
pub fn burn_down<R: Rng>(grid: &mut ForestGrid, regrowth: f64, rng: &mut R) -> FireEpisodeResult {
    let mut burning = grid.count(CellState::Burning) as u64;
    let mut total_burned = burning;
    let mut duration = 0;
    while burning > 0 {
        step_forest(grid, regrowth, rng);
        burning = grid.count(CellState::Burning) as u64;
        total_burned += burning;
        duration += 1;
    }
    FireEpisodeResult {
        total_burned,
        duration,
    }
}

/// Run one full fire episode: strike a random tree, then burn down.
///
/// A grid with zero trees is a normal outcome, not an error: the episode
/// reports `total_burned = 0, duration = 0`, leaves the grid unchanged and
/// emits a diagnostic notice.
pub fn run_fire_episode<R: Rng>(
    grid: &mut ForestGrid,
    regrowth: f64,
    rng: &mut R,
) -> FireEpisodeResult {
    if lightning_strike(grid, rng).is_none() {
        debug!("no trees left to burn");
        return FireEpisodeResult::default();
    }
    burn_down(grid, regrowth, rng)
}
