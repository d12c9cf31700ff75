//! Synchronous transition rule for the forest lattice
//!
//! One step is computed entirely from a snapshot of the previous grid state:
//! the current cells are read while the next state is written into the
//! grid's back buffer, then the buffers swap. No cell ever observes a
//! partially updated neighbor.
//!
//! Neighbor lookups wrap toroidally (index ±1 modulo L). The boundary ring
//! is forced empty after every step, so the wrapped-to cells can never hold
//! fuel themselves, but the wraparound is part of the model's definition and
//! is kept as-is rather than clamped.

use crate::grid::{CellState, ForestGrid};
use rand::Rng;

/// Apply one synchronous transition step to the whole grid.
///
/// Rules, each evaluated on the pre-step state:
/// 1. a tree with at least one burning orthogonal neighbor ignites;
/// 2. a burning cell burns out to empty;
/// 3. an empty cell regrows a tree with independent probability `regrowth`;
/// 4. the boundary ring is forced empty last.
pub fn step_forest<R: Rng>(grid: &mut ForestGrid, regrowth: f64, rng: &mut R) {
    let size = grid.size();
    {
        let (prev, next) = grid.ping_pong();
        step_cells(prev, next, size, regrowth, rng);
    }
    grid.swap_buffers();
    grid.enforce_boundary();
}

/// Compute the next state of every cell from the `prev` snapshot into `next`.
///
/// The three rules partition cells by their previous state, so a single
/// pass merging all of them is equivalent to three independent whole-grid
/// mask passes over the unmodified snapshot.
fn step_cells<R: Rng>(
    prev: &[CellState],
    next: &mut [CellState],
    size: usize,
    regrowth: f64,
    rng: &mut R,
) {
    for y in 0..size {
        let up = (y + size - 1) % size;
        let down = (y + 1) % size;
        for x in 0..size {
            let left = (x + size - 1) % size;
            let right = (x + 1) % size;
            let idx = y * size + x;
            next[idx] = match prev[idx] {
                CellState::Burning => CellState::Empty,
                CellState::Tree => {
                    let neighbor_burning = prev[up * size + x] == CellState::Burning
                        || prev[down * size + x] == CellState::Burning
                        || prev[y * size + left] == CellState::Burning
                        || prev[y * size + right] == CellState::Burning;
                    if neighbor_burning {
                        CellState::Burning
                    } else {
                        CellState::Tree
                    }
                }
                CellState::Empty => {
                    if rng.random::<f64>() < regrowth {
                        CellState::Tree
                    } else {
                        CellState::Empty
                    }
                }
            };
        }
    }
}
